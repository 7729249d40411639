//! UpdateTaskStatus command

use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::types::{TaskId, TaskStatus};
use planner_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use planner_store::Collection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// Set a task's status
#[operation(verb = "status", noun = "task", description = "Set a task's status (OPEN, IN_PROGRESS or COMPLETE)")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateTaskStatus {
    /// The task id
    pub id: TaskId,
    /// New status
    pub status: TaskStatus,
}

impl UpdateTaskStatus {
    pub fn new(id: impl Into<TaskId>, status: TaskStatus) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        let _lock = ctx.lock(&[Collection::Tasks]).await;

        let mut tasks = ctx.read_tasks().await?;
        let task = tasks
            .get_mut(&self.id)
            .ok_or_else(|| PlannerError::TaskNotFound {
                id: self.id.to_string(),
            })?;
        let previous = task.status;
        task.status = self.status;
        ctx.write_tasks(&tasks).await?;

        info!(task = %self.id, from = %previous, to = %self.status, "updated task status");
        Ok(json!({ "message": "Task status updated successfully" }))
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for UpdateTaskStatus {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        ExecutionResult::logged(self.op_string(), input, self.run(ctx).await, started)
    }
}
