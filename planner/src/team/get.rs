//! GetTeam command

use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::types::{Record, TeamId};
use planner_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Get a team by id
#[operation(verb = "get", noun = "team", description = "Get a team by id")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GetTeam {
    /// The team id
    pub id: TeamId,
}

impl GetTeam {
    pub fn new(id: impl Into<TeamId>) -> Self {
        Self { id: id.into() }
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        Ok(ctx.read_team(&self.id).await?.to_response()?)
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for GetTeam {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        ExecutionResult::unlogged(self.run(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_team, create_user, setup};

    #[tokio::test]
    async fn test_get_team() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        let id = create_team(&ctx, "core", &ana).await;

        let team = GetTeam::new(id.clone()).execute(&ctx).await.into_result().unwrap();
        assert_eq!(team["id"], id.as_str());
        assert_eq!(team["name"], "core");
        assert_eq!(team["admin"], ana.as_str());
    }

    #[tokio::test]
    async fn test_get_unknown_team() {
        let (_temp, ctx) = setup();
        let err = GetTeam::new("team_1").execute(&ctx).await.into_result().unwrap_err();
        assert!(matches!(err, PlannerError::TeamNotFound { .. }));
    }
}
