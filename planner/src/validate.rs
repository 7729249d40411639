//! Field checks shared by the operations

use crate::error::{PlannerError, Result};

/// Longest user name, team name, board name, task title or display name at creation
pub const NAME_MAX: usize = 64;

/// Longest description
pub const DESCRIPTION_MAX: usize = 128;

/// Longest display name accepted by `update user`
pub const DISPLAY_NAME_UPDATE_MAX: usize = 128;

/// Most users accepted by one `add members` call
pub const MEMBER_BATCH_MAX: usize = 50;

/// Reject an empty value
pub fn required(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PlannerError::missing_field(field));
    }
    Ok(())
}

/// Reject a value longer than `max` characters
pub fn max_len(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(PlannerError::too_long(field, max));
    }
    Ok(())
}
