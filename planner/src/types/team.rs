//! Team records

use super::{timestamp, Record, TeamId, TeamSummary, UserId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A named group of users with one admin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(skip)]
    pub id: TeamId,
    pub name: String,
    pub description: String,
    pub admin: UserId,
    #[serde(with = "timestamp")]
    pub creation_time: NaiveDateTime,
}

impl Team {
    pub fn new(
        id: TeamId,
        name: impl Into<String>,
        description: impl Into<String>,
        admin: UserId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            admin,
            creation_time: timestamp::now(),
        }
    }

    /// The copy stored in each member's team list
    pub fn summary(&self) -> TeamSummary {
        TeamSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            creation_time: self.creation_time,
        }
    }
}

impl Record for Team {
    type Id = TeamId;

    fn id(&self) -> &TeamId {
        &self.id
    }

    fn set_id(&mut self, id: TeamId) {
        self.id = id;
    }
}
