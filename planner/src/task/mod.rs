//! Task commands

mod add;
mod update_status;

pub use add::AddTask;
pub use update_status::UpdateTaskStatus;
