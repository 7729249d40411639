//! CreateTeam command

use super::join;
use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::lookup::UserLookup;
use crate::types::{IdSequence, Team, TeamId, UserId};
use crate::validate::{self, DESCRIPTION_MAX, NAME_MAX};
use planner_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use planner_store::Collection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// Create a team with an admin
#[operation(verb = "create", noun = "team", description = "Create a team with an admin")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreateTeam {
    /// Globally unique team name
    pub name: String,
    /// What the team does
    pub description: String,
    /// User id of the admin, who becomes the first member
    pub admin: UserId,
}

impl CreateTeam {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        admin: impl Into<UserId>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            admin: admin.into(),
        }
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        validate::required("name", &self.name)?;
        validate::required("description", &self.description)?;
        validate::required("admin", self.admin.as_str())?;
        validate::max_len("name", &self.name, NAME_MAX)?;
        validate::max_len("description", &self.description, DESCRIPTION_MAX)?;

        let _lock = ctx
            .lock(&[
                Collection::Users,
                Collection::UserTeams,
                Collection::Teams,
                Collection::TeamMembers,
            ])
            .await;

        if !ctx.user_exists(&self.admin).await? {
            return Err(PlannerError::unknown("admin user", self.admin.as_str()));
        }

        let mut teams = ctx.read_teams().await?;
        if teams.values().any(|t| t.name == self.name) {
            return Err(PlannerError::duplicate("team", &self.name, ""));
        }

        let id: TeamId = IdSequence::from_keys(teams.keys()).next_id()?;
        let team = Team::new(id.clone(), &self.name, &self.description, self.admin.clone());

        let mut members = ctx.read_team_members().await?;
        let mut user_teams = ctx.read_user_teams().await?;
        join(&team, &self.admin, &mut members, &mut user_teams);

        teams.insert(id.clone(), team);
        ctx.write_teams(&teams).await?;
        ctx.write_team_members(&members).await?;
        ctx.write_user_teams(&user_teams).await?;

        info!(team = %id, admin = %self.admin, "created team");
        Ok(json!({ "id": id }))
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for CreateTeam {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        ExecutionResult::logged(self.op_string(), input, self.run(ctx).await, started)
    }
}
