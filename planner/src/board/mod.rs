//! Board commands
//!
//! A board starts OPEN and can only move to CLOSED, which requires every task
//! on it to be COMPLETE.

mod close;
mod create;
mod export;
mod list;

pub use close::CloseBoard;
pub use create::CreateBoard;
pub use export::ExportBoard;
pub use list::ListBoards;
