//! # Planner
//!
//! Users, teams, project boards and tasks, kept in a JSON document store.
//!
//! ## Architecture
//!
//! Every operation is a request struct. Its fields are the parameters, and it
//! implements `Execute<PlannerContext, PlannerError>`:
//!
//! - **user** - create, list, get, update, teams
//! - **team** - create, list, get, update; add, remove and list members
//! - **board** - create, close, list, export
//! - **task** - add, status
//!
//! Operations validate their input, check references through [`UserLookup`]
//! and [`TeamLookup`], then rewrite the collections they own. Mutations return
//! `ExecutionResult::Logged`, and [`PlannerOperationProcessor`] appends the log
//! entry to the store's activity log.
//!
//! ## Usage
//!
//! ```ignore
//! use planner::{user::CreateUser, PlannerContext, PlannerOperationProcessor};
//! use planner_operations::OperationProcessor;
//!
//! let ctx = PlannerContext::in_memory("out");
//! let processor = PlannerOperationProcessor::new();
//! let result = processor.process(&CreateUser::new("ana", "Ana"), &ctx).await?;
//! assert_eq!(result["id"], "user_1");
//! ```

pub mod board;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod lookup;
pub mod processor;
pub mod task;
pub mod team;
pub mod types;
pub mod user;
pub mod validate;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use context::PlannerContext;
pub use dispatch::{operations, parse_operation, PlannerOperation};
pub use error::{ErrorKind, PlannerError, Result};
pub use lookup::{TeamLookup, UserLookup};
pub use processor::PlannerOperationProcessor;

// Re-export the operation traits so callers need only this crate
pub use planner_operations::{Execute, ExecutionResult, LogEntry, Operation, OperationProcessor};
