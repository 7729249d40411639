//! Operation processing with activity logging

use crate::{Execute, Operation};
use async_trait::async_trait;
use serde_json::Value;

/// Runs operations and persists the log entries they produce
///
/// Implementations decide where log entries go and which actor they are
/// attributed to. Callers get back a plain `Result`.
#[async_trait]
pub trait OperationProcessor<C, E>: Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    async fn process<O>(&self, operation: &O, ctx: &C) -> Result<Value, E>
    where
        O: Execute<C, E> + Operation + ?Sized;
}
