//! Process exit codes

use planner::{ErrorKind, PlannerError};

pub const EXIT_SUCCESS: i32 = 0;

/// Rejected request, bad arguments, or an internal failure
pub const EXIT_ERROR: i32 = 1;

/// A record addressed by id does not exist
pub const EXIT_NOT_FOUND: i32 = 2;

/// Map a failure to its exit code
pub fn for_error(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<PlannerError>().map(PlannerError::kind) {
        Some(ErrorKind::NotFound) => EXIT_NOT_FOUND,
        _ => EXIT_ERROR,
    }
}
