//! Runs operations and records them in the activity log

use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use planner_operations::{async_trait, Execute, Operation, OperationProcessor};
use serde_json::Value;
use tracing::{debug, warn};

/// Executes planner operations and appends their log entries to the store
#[derive(Debug, Clone, Default)]
pub struct PlannerOperationProcessor {
    actor: Option<String>,
}

impl PlannerOperationProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute every logged entry to `actor`
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }
}

#[async_trait]
impl OperationProcessor<PlannerContext, PlannerError> for PlannerOperationProcessor {
    async fn process<O>(&self, operation: &O, ctx: &PlannerContext) -> Result<Value>
    where
        O: Execute<PlannerContext, PlannerError> + Operation + ?Sized,
    {
        let (result, log_entry) = operation.execute(ctx).await.split();

        if let Some(mut entry) = log_entry {
            if let Some(actor) = &self.actor {
                entry = entry.with_actor(actor.clone());
            }
            // The operation's own outcome stands even if the log write fails
            if let Err(e) = ctx.append_activity(&entry).await {
                warn!(op = %entry.op, "failed to append activity log entry: {}", e);
            }
        }

        if let Err(e) = &result {
            debug!(op = %operation.op_string(), "operation failed: {}", e);
        }
        result
    }
}
