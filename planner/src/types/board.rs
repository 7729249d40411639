//! Project board records

use super::{timestamp, BoardId, Record, TeamId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a board still accepts work
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoardStatus {
    #[default]
    Open,
    Closed,
}

impl BoardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A container of tasks owned by one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(skip)]
    pub id: BoardId,
    pub name: String,
    pub description: String,
    pub team_id: TeamId,
    #[serde(with = "timestamp")]
    pub creation_time: NaiveDateTime,
    pub status: BoardStatus,
    /// Set when the board is closed
    #[serde(with = "timestamp::option", default)]
    pub end_time: Option<NaiveDateTime>,
}

impl Board {
    pub fn new(
        id: BoardId,
        name: impl Into<String>,
        description: impl Into<String>,
        team_id: TeamId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            team_id,
            creation_time: timestamp::now(),
            status: BoardStatus::Open,
            end_time: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == BoardStatus::Open
    }
}

impl Record for Board {
    type Id = BoardId;

    fn id(&self) -> &BoardId {
        &self.id
    }

    fn set_id(&mut self, id: BoardId) {
        self.id = id;
    }
}
