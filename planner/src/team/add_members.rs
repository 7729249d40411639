//! AddMembers command

use super::join;
use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::lookup::{TeamLookup, UserLookup};
use crate::types::{TeamId, UserId};
use crate::validate::MEMBER_BATCH_MAX;
use planner_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use planner_store::Collection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// Add users to a team
#[operation(verb = "add", noun = "members", description = "Add users to a team")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AddMembers {
    /// The team id
    pub id: TeamId,
    /// User ids to add, at most 50
    pub users: Vec<UserId>,
}

impl AddMembers {
    pub fn new(id: impl Into<TeamId>, users: impl IntoIterator<Item = impl Into<UserId>>) -> Self {
        Self {
            id: id.into(),
            users: users.into_iter().map(Into::into).collect(),
        }
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        if self.users.is_empty() {
            return Err(PlannerError::invalid_value("users", "at least one user id is required"));
        }
        if self.users.len() > MEMBER_BATCH_MAX {
            return Err(PlannerError::invalid_value(
                "users",
                format!("cannot add more than {MEMBER_BATCH_MAX} users at once"),
            ));
        }

        let _lock = ctx
            .lock(&[
                Collection::Users,
                Collection::UserTeams,
                Collection::Teams,
                Collection::TeamMembers,
            ])
            .await;

        let Some(team) = ctx.find_team(&self.id).await? else {
            return Err(PlannerError::unknown("team", self.id.as_str()));
        };

        let known = ctx.find_users(&self.users).await?;
        if let Some(missing) = self.users.iter().find(|id| !known.contains_key(*id)) {
            return Err(PlannerError::unknown("user", missing.as_str()));
        }

        let mut members = ctx.read_team_members().await?;
        let mut user_teams = ctx.read_user_teams().await?;
        let mut added = 0;
        for user in &self.users {
            if join(&team, user, &mut members, &mut user_teams) {
                added += 1;
            }
        }
        ctx.write_team_members(&members).await?;
        ctx.write_user_teams(&user_teams).await?;

        info!(team = %self.id, added, "added team members");
        Ok(json!({ "message": "Users added to team successfully" }))
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for AddMembers {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        ExecutionResult::logged(self.op_string(), input, self.run(ctx).await, started)
    }
}
