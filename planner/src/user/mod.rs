//! User commands

mod create;
mod get;
mod list;
mod teams;
mod update;

pub use create::CreateUser;
pub use get::GetUser;
pub use list::ListUsers;
pub use teams::UserTeams;
pub use update::{UpdateUser, UserPatch};
