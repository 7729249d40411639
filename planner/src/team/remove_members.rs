//! RemoveMembers command

use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::lookup::TeamLookup;
use crate::types::{TeamId, UserId};
use planner_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use planner_store::Collection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// Remove users from a team
#[operation(verb = "remove", noun = "members", description = "Remove users from a team")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RemoveMembers {
    /// The team id
    pub id: TeamId,
    /// User ids to remove; non-members are skipped
    pub users: Vec<UserId>,
}

impl RemoveMembers {
    pub fn new(id: impl Into<TeamId>, users: impl IntoIterator<Item = impl Into<UserId>>) -> Self {
        Self {
            id: id.into(),
            users: users.into_iter().map(Into::into).collect(),
        }
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        let _lock = ctx
            .lock(&[
                Collection::UserTeams,
                Collection::Teams,
                Collection::TeamMembers,
            ])
            .await;

        let Some(team) = ctx.find_team(&self.id).await? else {
            return Err(PlannerError::TeamNotFound {
                id: self.id.to_string(),
            });
        };
        if self.users.is_empty() {
            return Err(PlannerError::invalid_value("users", "at least one user id is required"));
        }

        let mut members = ctx.read_team_members().await?;
        let current = members.entry(self.id.clone()).or_default();

        let leaving: Vec<&UserId> = self.users.iter().filter(|u| current.contains(*u)).collect();
        if leaving.iter().any(|u| **u == team.admin) {
            return Err(PlannerError::AdminRemoval {
                user: team.admin.to_string(),
                team: self.id.to_string(),
            });
        }

        for user in &leaving {
            current.shift_remove(*user);
        }

        let mut user_teams = ctx.read_user_teams().await?;
        for user in &leaving {
            if let Some(summaries) = user_teams.get_mut(*user) {
                summaries.retain(|s| s.id != self.id);
            }
        }

        ctx.write_team_members(&members).await?;
        ctx.write_user_teams(&user_teams).await?;

        info!(team = %self.id, removed = leaving.len(), "removed team members");
        Ok(json!({ "message": "Users removed from team successfully" }))
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for RemoveMembers {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        ExecutionResult::logged(self.op_string(), input, self.run(ctx).await, started)
    }
}
