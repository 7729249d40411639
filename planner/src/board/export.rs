//! ExportBoard command

use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::export::{report_file_name, BoardReport};
use crate::lookup::{TeamLookup, UserLookup};
use crate::types::{timestamp, BoardId, UserId};
use planner_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io;
use std::time::Instant;
use tracing::info;

/// Write a text report of a board to the output directory
#[operation(verb = "export", noun = "board", description = "Write a text report of a board to the output directory")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExportBoard {
    /// The board id
    pub id: BoardId,
}

impl ExportBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        let board = ctx.read_board(&self.id).await?;
        let team_name = ctx.find_team(&board.team_id).await?.map(|t| t.name);

        let tasks: Vec<_> = ctx
            .read_tasks()
            .await?
            .into_values()
            .filter(|t| t.board_id == self.id)
            .collect();

        let assignees: Vec<UserId> = tasks.iter().map(|t| t.user_id.clone()).collect();
        let display_names = ctx
            .find_users(&assignees)
            .await?
            .into_iter()
            .map(|(id, user)| (id, user.display_name))
            .collect();

        let report = BoardReport {
            board,
            team_name,
            tasks,
            display_names,
        };
        let text = report.render();
        let at = timestamp::now();

        let mut copy = 0;
        let (file_name, path) = loop {
            let file_name = report_file_name(&report.board, at, copy);
            match ctx.write_report(&file_name, &text).await {
                Ok(path) => break (file_name, path),
                Err(PlannerError::Io(e)) if e.kind() == io::ErrorKind::AlreadyExists => copy += 1,
                Err(e) => return Err(e),
            }
        };

        info!(board = %self.id, path = %path.display(), "exported board");
        Ok(json!({ "out_file": file_name }))
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for ExportBoard {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        ExecutionResult::logged(self.op_string(), input, self.run(ctx).await, started)
    }
}
