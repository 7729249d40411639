//! Board report rendering
//!
//! Pure formatting: callers gather the board, its tasks and the assignees'
//! display names, and decide where the text goes.

mod report;

pub use report::{report_file_name, BoardReport, StatusCounts};
