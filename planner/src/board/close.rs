//! CloseBoard command

use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::types::{timestamp, BoardId, BoardStatus, TaskStatus};
use planner_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use planner_store::Collection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// Close a board once all of its tasks are complete
#[operation(verb = "close", noun = "board", description = "Close a board once all of its tasks are complete")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CloseBoard {
    /// The board id
    pub id: BoardId,
}

impl CloseBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        let _lock = ctx.lock(&[Collection::Boards, Collection::Tasks]).await;

        let mut boards = ctx.read_boards().await?;
        let board = boards
            .get_mut(&self.id)
            .ok_or_else(|| PlannerError::BoardNotFound {
                id: self.id.to_string(),
            })?;

        if !board.is_open() {
            return Err(PlannerError::invalid_state(format!(
                "board '{}' is already CLOSED",
                self.id
            )));
        }

        let tasks = ctx.read_tasks().await?;
        if let Some(blocking) = tasks
            .values()
            .find(|t| t.board_id == self.id && t.status != TaskStatus::Complete)
        {
            return Err(PlannerError::IncompleteTask {
                title: blocking.title.clone(),
            });
        }

        board.status = BoardStatus::Closed;
        board.end_time = Some(timestamp::now());
        ctx.write_boards(&boards).await?;

        info!(board = %self.id, "closed board");
        Ok(json!({ "message": "Board closed successfully" }))
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for CloseBoard {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        ExecutionResult::logged(self.op_string(), input, self.run(ctx).await, started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::UpdateTaskStatus;
    use crate::test_support::{add_task, create_board, create_team, create_user, setup};

    #[tokio::test]
    async fn test_close_empty_board() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        let team = create_team(&ctx, "core", &ana).await;
        let board = create_board(&ctx, "Sprint 1", &team).await;

        let result = CloseBoard::new(board.clone())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["message"], "Board closed successfully");

        let closed = ctx.read_board(&board).await.unwrap();
        assert_eq!(closed.status, BoardStatus::Closed);
        assert!(closed.end_time.is_some());
    }

    #[tokio::test]
    async fn test_close_blocked_by_incomplete_task() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        let team = create_team(&ctx, "core", &ana).await;
        let board = create_board(&ctx, "Sprint 1", &team).await;
        let done = add_task(&ctx, "done", &ana, &board).await;
        let pending = add_task(&ctx, "pending", &ana, &board).await;

        UpdateTaskStatus::new(done, TaskStatus::Complete)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let err = CloseBoard::new(board.clone())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, PlannerError::IncompleteTask { ref title } if title == "pending"));
        assert!(ctx.read_board(&board).await.unwrap().is_open());

        UpdateTaskStatus::new(pending, TaskStatus::Complete)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        CloseBoard::new(board.clone())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
    }

    #[tokio::test]
    async fn test_other_boards_do_not_block() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        let team = create_team(&ctx, "core", &ana).await;
        let busy = create_board(&ctx, "Busy", &team).await;
        let idle = create_board(&ctx, "Idle", &team).await;
        add_task(&ctx, "open work", &ana, &busy).await;

        CloseBoard::new(idle).execute(&ctx).await.into_result().unwrap();
    }

    #[tokio::test]
    async fn test_close_twice() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        let team = create_team(&ctx, "core", &ana).await;
        let board = create_board(&ctx, "Sprint 1", &team).await;

        CloseBoard::new(board.clone()).execute(&ctx).await.into_result().unwrap();
        let end_time = ctx.read_board(&board).await.unwrap().end_time;

        let err = CloseBoard::new(board.clone())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidState { .. }));
        assert_eq!(ctx.read_board(&board).await.unwrap().end_time, end_time);
    }

    #[tokio::test]
    async fn test_unknown_board() {
        let (_temp, ctx) = setup();
        let err = CloseBoard::new("board_2").execute(&ctx).await.into_result().unwrap_err();
        assert!(err.is_not_found());
    }
}
