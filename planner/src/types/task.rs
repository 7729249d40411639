//! Task records

use super::{timestamp, BoardId, Record, TaskId, UserId};
use crate::error::PlannerError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Progress of a task
///
/// Any status may follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Complete,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::Open, Self::InProgress, Self::Complete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Complete => "COMPLETE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                PlannerError::invalid_value("status", "must be one of: OPEN, IN_PROGRESS, COMPLETE")
            })
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = PlannerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A unit of work on a board, owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(skip)]
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub user_id: UserId,
    pub board_id: BoardId,
    pub status: TaskStatus,
    #[serde(with = "timestamp")]
    pub creation_time: NaiveDateTime,
}

impl Task {
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        user_id: UserId,
        board_id: BoardId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            user_id,
            board_id,
            status: TaskStatus::Open,
            creation_time: timestamp::now(),
        }
    }
}

impl Record for Task {
    type Id = TaskId;

    fn id(&self) -> &TaskId {
        &self.id
    }

    fn set_id(&mut self, id: TaskId) {
        self.id = id;
    }
}
