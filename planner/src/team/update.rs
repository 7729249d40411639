//! UpdateTeam command

use super::join;
use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::lookup::UserLookup;
use crate::types::{TeamId, UserId};
use crate::validate::{self, DESCRIPTION_MAX, NAME_MAX};
use planner_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use planner_store::Collection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// Fields a caller may change on a team
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TeamPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<UserId>,
}

/// Update a team's name, description or admin
#[operation(verb = "update", noun = "team", description = "Update a team's name, description or admin")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateTeam {
    /// The team id
    pub id: TeamId,
    /// Changes to apply
    #[serde(default)]
    pub team: TeamPatch,
}

impl UpdateTeam {
    pub fn new(id: impl Into<TeamId>) -> Self {
        Self {
            id: id.into(),
            team: TeamPatch::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.team.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.team.description = Some(description.into());
        self
    }

    pub fn with_admin(mut self, admin: impl Into<UserId>) -> Self {
        self.team.admin = Some(admin.into());
        self
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        let _lock = ctx
            .lock(&[
                Collection::Users,
                Collection::UserTeams,
                Collection::Teams,
                Collection::TeamMembers,
            ])
            .await;

        let mut teams = ctx.read_teams().await?;
        if !teams.contains_key(&self.id) {
            return Err(PlannerError::TeamNotFound {
                id: self.id.to_string(),
            });
        }

        // Validate everything before touching any collection
        if let Some(name) = &self.team.name {
            validate::required("name", name)?;
            validate::max_len("name", name, NAME_MAX)?;
            if teams.iter().any(|(id, t)| id != &self.id && &t.name == name) {
                return Err(PlannerError::duplicate("team", name, ""));
            }
        }
        if let Some(description) = &self.team.description {
            validate::required("description", description)?;
            validate::max_len("description", description, DESCRIPTION_MAX)?;
        }
        if let Some(admin) = &self.team.admin {
            if !ctx.user_exists(admin).await? {
                return Err(PlannerError::unknown("admin user", admin.as_str()));
            }
        }

        let Some(team) = teams.get_mut(&self.id) else {
            return Err(PlannerError::TeamNotFound {
                id: self.id.to_string(),
            });
        };
        if let Some(name) = &self.team.name {
            team.name = name.clone();
        }
        if let Some(description) = &self.team.description {
            team.description = description.clone();
        }
        let summary_changed = self.team.name.is_some() || self.team.description.is_some();

        if summary_changed || self.team.admin.is_some() {
            let mut members = ctx.read_team_members().await?;
            let mut user_teams = ctx.read_user_teams().await?;

            if summary_changed {
                let summary = team.summary();
                for entry in user_teams.values_mut().flatten() {
                    if entry.id == summary.id {
                        *entry = summary.clone();
                    }
                }
            }
            if let Some(admin) = &self.team.admin {
                join(team, admin, &mut members, &mut user_teams);
                team.admin = admin.clone();
            }

            ctx.write_teams(&teams).await?;
            ctx.write_team_members(&members).await?;
            ctx.write_user_teams(&user_teams).await?;
            info!(team = %self.id, "updated team");
        }

        Ok(json!({ "message": "Team updated successfully" }))
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for UpdateTeam {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        ExecutionResult::logged(self.op_string(), input, self.run(ctx).await, started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::TeamLookup;
    use crate::team::GetTeam;
    use crate::test_support::{add_members, create_team, create_user, setup};

    #[tokio::test]
    async fn test_rename_refreshes_member_summaries() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        let bo = create_user(&ctx, "bo").await;
        let team = create_team(&ctx, "core", &ana).await;
        add_members(&ctx, &team, &[bo.clone()]).await;

        let result = UpdateTeam::new(team.clone())
            .with_name("platform")
            .with_description("Platform team")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["message"], "Team updated successfully");

        let described = GetTeam::new(team.clone()).execute(&ctx).await.into_result().unwrap();
        assert_eq!(described["name"], "platform");
        assert_eq!(described["description"], "Platform team");

        let user_teams = ctx.read_user_teams().await.unwrap();
        for user in [&ana, &bo] {
            assert_eq!(user_teams[user][0].name, "platform");
            assert_eq!(user_teams[user][0].description, "Platform team");
        }
    }

    #[tokio::test]
    async fn test_new_admin_joins_team() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        let cy = create_user(&ctx, "cy").await;
        let team = create_team(&ctx, "core", &ana).await;

        UpdateTeam::new(team.clone())
            .with_admin(cy.clone())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(ctx.read_team(&team).await.unwrap().admin, cy);
        let members = ctx.team_members(&team).await.unwrap();
        assert!(members.contains(&cy));
        assert!(members.contains(&ana));
        assert_eq!(ctx.read_user_teams().await.unwrap()[&cy][0].id, team);
    }

    #[tokio::test]
    async fn test_rename_to_own_name_is_allowed() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        let team = create_team(&ctx, "core", &ana).await;

        UpdateTeam::new(team)
            .with_name("core")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
    }

    #[tokio::test]
    async fn test_failed_validation_changes_nothing() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        let team = create_team(&ctx, "core", &ana).await;
        create_team(&ctx, "web", &ana).await;
        let before = ctx.read_team(&team).await.unwrap();

        // Valid description, taken name
        let err = UpdateTeam::new(team.clone())
            .with_description("changed")
            .with_name("web")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, PlannerError::DuplicateName { .. }));

        // Valid name, unknown admin
        let err = UpdateTeam::new(team.clone())
            .with_name("renamed")
            .with_admin("user_77")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(err.is_validation());

        let err = UpdateTeam::new(team.clone())
            .with_description("d".repeat(129))
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, PlannerError::FieldTooLong { .. }));

        assert_eq!(ctx.read_team(&team).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_unknown_team() {
        let (_temp, ctx) = setup();
        let err = UpdateTeam::new("team_5")
            .with_name("x")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
