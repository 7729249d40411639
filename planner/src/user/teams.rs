//! UserTeams command

use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::types::UserId;
use planner_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List the teams a user belongs to
#[operation(verb = "teams", noun = "user", description = "List the teams a user belongs to")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserTeams {
    /// The user id
    pub id: UserId,
}

impl UserTeams {
    pub fn new(id: impl Into<UserId>) -> Self {
        Self { id: id.into() }
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        // Existence check against the user directory, not the team lists
        ctx.read_user(&self.id).await?;
        let teams = ctx
            .read_user_teams()
            .await?
            .swap_remove(&self.id)
            .unwrap_or_default();
        Ok(serde_json::to_value(teams)?)
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for UserTeams {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        ExecutionResult::unlogged(self.run(ctx).await)
    }
}
