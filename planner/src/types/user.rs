//! User records

use super::{timestamp, Record, TeamId, UserId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A person who can join teams and own tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Restored from the collection key on load
    #[serde(skip)]
    pub id: UserId,
    /// Unique, immutable login name
    pub name: String,
    pub display_name: String,
    #[serde(with = "timestamp")]
    pub creation_time: NaiveDateTime,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            display_name: display_name.into(),
            creation_time: timestamp::now(),
        }
    }
}

impl Record for User {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn set_id(&mut self, id: UserId) {
        self.id = id;
    }
}

/// Entry in a user's team list
///
/// A denormalized copy of the team's descriptive fields, kept in step with
/// the team record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub id: TeamId,
    pub name: String,
    pub description: String,
    #[serde(with = "timestamp")]
    pub creation_time: NaiveDateTime,
}
