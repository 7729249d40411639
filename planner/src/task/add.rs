//! AddTask command

use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::lookup::{TeamLookup, UserLookup};
use crate::types::{BoardId, IdSequence, Task, TaskId, UserId};
use crate::validate::{self, DESCRIPTION_MAX, NAME_MAX};
use planner_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use planner_store::Collection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// Add a task to an open board
#[operation(verb = "add", noun = "task", description = "Add a task to an open board")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AddTask {
    /// Task title, unique within the board
    pub title: String,
    /// What needs doing
    pub description: String,
    /// Assignee; must be a member of the board's team
    pub user_id: UserId,
    /// The board to add to
    pub board_id: BoardId,
}

impl AddTask {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        user_id: impl Into<UserId>,
        board_id: impl Into<BoardId>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            user_id: user_id.into(),
            board_id: board_id.into(),
        }
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        validate::required("title", &self.title)?;
        validate::required("description", &self.description)?;
        validate::required("user_id", self.user_id.as_str())?;
        validate::required("board_id", self.board_id.as_str())?;
        validate::max_len("title", &self.title, NAME_MAX)?;
        validate::max_len("description", &self.description, DESCRIPTION_MAX)?;

        let _lock = ctx
            .lock(&[
                Collection::Users,
                Collection::TeamMembers,
                Collection::Boards,
                Collection::Tasks,
            ])
            .await;

        let boards = ctx.read_boards().await?;
        let Some(board) = boards.get(&self.board_id) else {
            return Err(PlannerError::unknown("board", self.board_id.as_str()));
        };
        if !board.is_open() {
            return Err(PlannerError::invalid_state(format!(
                "board '{}' is {}; tasks can only be added to OPEN boards",
                self.board_id, board.status
            )));
        }

        if !ctx.user_exists(&self.user_id).await? {
            return Err(PlannerError::unknown("user", self.user_id.as_str()));
        }
        if !ctx.team_members(&board.team_id).await?.contains(&self.user_id) {
            return Err(PlannerError::NotMember {
                user: self.user_id.to_string(),
                team: board.team_id.to_string(),
            });
        }

        let mut tasks = ctx.read_tasks().await?;
        if tasks
            .values()
            .any(|t| t.board_id == self.board_id && t.title == self.title)
        {
            return Err(PlannerError::duplicate("task", &self.title, " in this board"));
        }

        let id: TaskId = IdSequence::from_keys(tasks.keys()).next_id()?;
        tasks.insert(
            id.clone(),
            Task::new(
                id.clone(),
                &self.title,
                &self.description,
                self.user_id.clone(),
                self.board_id.clone(),
            ),
        );
        ctx.write_tasks(&tasks).await?;

        info!(task = %id, board = %self.board_id, user = %self.user_id, "added task");
        Ok(json!({ "id": id }))
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for AddTask {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        ExecutionResult::logged(self.op_string(), input, self.run(ctx).await, started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CloseBoard;
    use crate::test_support::{create_board, create_team, create_user, setup};
    use crate::types::TaskStatus;

    #[tokio::test]
    async fn test_add_task() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        let team = create_team(&ctx, "core", &ana).await;
        let board = create_board(&ctx, "Sprint 1", &team).await;

        let result = AddTask::new("Design", "Sketch the API", ana.clone(), board.clone())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["id"], "task_1");

        let tasks = ctx.read_tasks().await.unwrap();
        let task = &tasks[&TaskId::from("task_1")];
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.user_id, ana);
        assert_eq!(task.board_id, board);
    }

    #[tokio::test]
    async fn test_assignee_must_be_member() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        let outsider = create_user(&ctx, "outsider").await;
        let team = create_team(&ctx, "core", &ana).await;
        let board = create_board(&ctx, "Sprint 1", &team).await;

        let err = AddTask::new("Design", "d", outsider, board)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, PlannerError::NotMember { .. }));
        assert!(ctx.read_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_references() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        let team = create_team(&ctx, "core", &ana).await;
        let board = create_board(&ctx, "Sprint 1", &team).await;

        let err = AddTask::new("Design", "d", ana, "board_9")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, PlannerError::UnknownReference { ref kind, .. } if kind == "board"));

        let err = AddTask::new("Design", "d", "user_9", board)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, PlannerError::UnknownReference { ref kind, .. } if kind == "user"));
    }

    #[tokio::test]
    async fn test_closed_board_rejects_tasks() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        let team = create_team(&ctx, "core", &ana).await;
        let board = create_board(&ctx, "Sprint 1", &team).await;
        CloseBoard::new(board.clone()).execute(&ctx).await.into_result().unwrap();

        let err = AddTask::new("Late", "d", ana, board)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidState { .. }));
        assert!(err.to_string().contains("OPEN boards"));
    }

    #[tokio::test]
    async fn test_titles_unique_per_board() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        let team = create_team(&ctx, "core", &ana).await;
        let first = create_board(&ctx, "Sprint 1", &team).await;
        let second = create_board(&ctx, "Sprint 2", &team).await;

        AddTask::new("Design", "d", ana.clone(), first.clone())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        AddTask::new("Design", "d", ana.clone(), second)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let err = AddTask::new("Design", "again", ana, first)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, PlannerError::DuplicateName { .. }));
    }

    #[tokio::test]
    async fn test_field_validation() {
        let (_temp, ctx) = setup();

        let err = AddTask::new("", "d", "user_1", "board_1")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, PlannerError::MissingField { ref field } if field == "title"));

        let err = AddTask::new("t", "d", "", "board_1")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, PlannerError::MissingField { ref field } if field == "user_id"));

        let err = AddTask::new("t".repeat(65), "d", "user_1", "board_1")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, PlannerError::FieldTooLong { .. }));
    }
}
