//! ListTeams command

use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::types::Record;
use planner_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List all teams
#[operation(verb = "list", noun = "teams", description = "List all teams")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListTeams {}

impl ListTeams {
    pub fn new() -> Self {
        Self {}
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        let teams = ctx
            .read_teams()
            .await?
            .values()
            .map(|team| team.to_response())
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(Value::Array(teams))
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for ListTeams {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        ExecutionResult::unlogged(self.run(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_team, create_user, setup};

    #[tokio::test]
    async fn test_list_teams() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        create_team(&ctx, "core", &ana).await;
        create_team(&ctx, "web", &ana).await;

        let teams = ListTeams::new().execute(&ctx).await.into_result().unwrap();
        let teams = teams.as_array().unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0]["name"], "core");
        assert_eq!(teams[1]["name"], "web");
        assert_eq!(teams[1]["admin"], ana.as_str());
        assert_eq!(teams[1]["id"], "team_2");
    }
}
