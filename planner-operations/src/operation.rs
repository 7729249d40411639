//! The Operation and Execute traits

use crate::{ExecutionResult, ParamMeta};
use async_trait::async_trait;
use serde_json::Value;

/// Metadata every operation exposes, generated by `#[operation]`
pub trait Operation {
    /// The action, e.g. "create"
    fn verb(&self) -> &'static str;

    /// The thing acted on, e.g. "user"
    fn noun(&self) -> &'static str;

    /// One-line help text
    fn description(&self) -> &'static str;

    /// Parameters derived from the struct fields
    fn parameters(&self) -> &'static [ParamMeta];

    /// Canonical op string used for dispatch and logging ("create user")
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Run an operation against a context
#[async_trait]
pub trait Execute<C, E>: Send + Sync
where
    C: Send + Sync,
{
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;
}
