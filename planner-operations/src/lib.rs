//! # Planner Operations
//!
//! This crate provides the `Operation` trait for defining planner operations.
//! Operations are request structs where the fields ARE the parameters.
//!
//! ## Example
//!
//! ```ignore
//! use planner_operations::*;
//!
//! #[operation(verb = "create", noun = "user", description = "Create a new user")]
//! #[derive(Debug, Deserialize, Serialize)]
//! pub struct CreateUser {
//!     /// Unique login name
//!     pub name: String,
//!     /// Name shown in reports
//!     pub display_name: String,
//! }
//!
//! #[async_trait]
//! impl Execute<PlannerContext, PlannerError> for CreateUser {
//!     async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
//!         // returns ExecutionResult::Logged for mutations, Unlogged for reads
//!     }
//! }
//! ```

// Lets the `#[operation]` expansion resolve `planner_operations::` inside this crate's own tests
extern crate self as planner_operations;

mod execution_result;
mod log;
mod operation;
mod parameter;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use parameter::{ParamMeta, ParamType};
pub use processor::OperationProcessor;

// Re-export proc macros
pub use planner_operations_macros::operation;

// Re-export for use in implementations
pub use async_trait::async_trait;
pub use serde_json::Value;
