//! Command line front end for planner
//!
//! `planner <noun> <verb> [REQUEST]` runs one operation. The request is a JSON
//! object given inline, or read from stdin when it is `-`.

pub mod cli;
pub mod exit_codes;
pub mod logging;
pub mod run;

pub use cli::{Cli, Commands, Invocation, RequestSource};
