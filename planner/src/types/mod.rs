//! Core types for the planner engine

mod board;
mod ids;
mod task;
mod team;
pub mod timestamp;
mod user;

pub use board::{Board, BoardStatus};
pub use ids::{BoardId, EntityId, IdSequence, TaskId, TeamId, UserId};
pub use task::{Task, TaskStatus};
pub use team::Team;
pub use user::{TeamSummary, User};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A record stored under its id in a collection
///
/// The id is the collection key, so it is not part of the stored value.
pub trait Record: Serialize + DeserializeOwned {
    type Id: EntityId;

    fn id(&self) -> &Self::Id;

    fn set_id(&mut self, id: Self::Id);

    /// The record as returned to callers, with its id included
    fn to_response(&self) -> serde_json::Result<Value> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            map.insert("id".into(), Value::String(self.id().as_str().to_string()));
        }
        Ok(value)
    }
}
