//! ListBoards command

use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::lookup::TeamLookup;
use crate::types::TeamId;
use planner_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List a team's boards
#[operation(verb = "list", noun = "boards", description = "List a team's boards")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListBoards {
    /// The team id
    pub id: TeamId,
}

impl ListBoards {
    pub fn new(id: impl Into<TeamId>) -> Self {
        Self { id: id.into() }
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        if !ctx.team_exists(&self.id).await? {
            return Err(PlannerError::TeamNotFound {
                id: self.id.to_string(),
            });
        }

        let boards: Vec<Value> = ctx
            .read_boards()
            .await?
            .values()
            .filter(|b| b.team_id == self.id)
            .map(|b| json!({ "id": b.id, "name": b.name, "status": b.status }))
            .collect();
        Ok(Value::Array(boards))
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for ListBoards {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        ExecutionResult::unlogged(self.run(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CloseBoard;
    use crate::test_support::{create_board, create_team, create_user, setup};

    #[tokio::test]
    async fn test_list_boards_for_team() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        let core = create_team(&ctx, "core", &ana).await;
        let web = create_team(&ctx, "web", &ana).await;
        let first = create_board(&ctx, "Sprint 1", &core).await;
        create_board(&ctx, "Landing", &web).await;
        create_board(&ctx, "Sprint 2", &core).await;
        CloseBoard::new(first).execute(&ctx).await.into_result().unwrap();

        let boards = ListBoards::new(core).execute(&ctx).await.into_result().unwrap();
        assert_eq!(
            boards,
            json!([
                {"id": "board_1", "name": "Sprint 1", "status": "CLOSED"},
                {"id": "board_3", "name": "Sprint 2", "status": "OPEN"},
            ])
        );
    }

    #[tokio::test]
    async fn test_unknown_team() {
        let (_temp, ctx) = setup();
        let err = ListBoards::new("team_1").execute(&ctx).await.into_result().unwrap_err();
        assert!(matches!(err, PlannerError::TeamNotFound { .. }));
    }
}
