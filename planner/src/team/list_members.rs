//! ListMembers command

use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::lookup::{TeamLookup, UserLookup};
use crate::types::TeamId;
use planner_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

/// List the members of a team
#[operation(verb = "list", noun = "members", description = "List the members of a team")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListMembers {
    /// The team id
    pub id: TeamId,
}

impl ListMembers {
    pub fn new(id: impl Into<TeamId>) -> Self {
        Self { id: id.into() }
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        if !ctx.team_exists(&self.id).await? {
            return Err(PlannerError::TeamNotFound {
                id: self.id.to_string(),
            });
        }

        let member_ids: Vec<_> = ctx.team_members(&self.id).await?.into_iter().collect();
        let users = ctx.find_users(&member_ids).await?;

        let mut members = Vec::with_capacity(member_ids.len());
        for id in &member_ids {
            match users.get(id) {
                Some(user) => members.push(json!({
                    "id": id,
                    "name": user.name,
                    "display_name": user.display_name,
                })),
                None => warn!(team = %self.id, user = %id, "skipping member with no user record"),
            }
        }
        Ok(Value::Array(members))
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for ListMembers {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        ExecutionResult::unlogged(self.run(ctx).await)
    }
}
