//! Document store for planner
//!
//! A document store persists whole named collections. Each collection is a JSON
//! object mapping ids to records, kept in insertion order. There are no
//! transactions: `save` overwrites the whole collection.
//!
//! ## Backends
//!
//! - [`JsonFileStore`] - one pretty-printed JSON file per collection, written atomically
//! - [`MemoryStore`] - in-process maps, used by tests and ephemeral sessions
//!
//! ## Storage Structure
//!
//! ```text
//! db/
//! ├── users.json
//! ├── user_teams.json
//! ├── teams.json
//! ├── team_members.json
//! ├── boards.json
//! ├── tasks.json
//! └── activity.jsonl     # Operation log, one JSON object per line
//! ```

mod collection;
mod error;
mod json_file;
mod memory;
mod store;

pub use collection::Collection;
pub use error::{Result, StoreError};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use store::{Document, DocumentStore};
