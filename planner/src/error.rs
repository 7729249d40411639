//! Error types for the planner engine

use planner_store::StoreError;
use thiserror::Error;

/// Result type for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Coarse classification used for exit codes and log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request was rejected; nothing was written
    Validation,
    /// A record addressed directly by id does not exist
    NotFound,
    /// Storage or serialization failure
    Internal,
}

/// Errors that can occur in planner operations
#[derive(Debug, Error)]
pub enum PlannerError {
    /// User not found
    #[error("user not found: {id}")]
    UserNotFound { id: String },

    /// Team not found
    #[error("team not found: {id}")]
    TeamNotFound { id: String },

    /// Board not found
    #[error("board not found: {id}")]
    BoardNotFound { id: String },

    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Missing or empty required field
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// Field longer than allowed
    #[error("{field} cannot exceed {max} characters")]
    FieldTooLong { field: String, max: usize },

    /// Name already taken within its scope
    #[error("{kind} with name '{name}' already exists{scope}")]
    DuplicateName {
        kind: String,
        name: String,
        scope: String,
    },

    /// A request referenced a record that does not exist
    #[error("{kind} '{id}' does not exist")]
    UnknownReference { kind: String, id: String },

    /// User is not a member of the team
    #[error("user '{user}' is not a member of team '{team}'")]
    NotMember { user: String, team: String },

    /// The team admin cannot be removed
    #[error("cannot remove admin user '{user}' from team '{team}'")]
    AdminRemoval { user: String, team: String },

    /// A board cannot close while a task is unfinished
    #[error("cannot close board: task '{title}' is not COMPLETE")]
    IncompleteTask { title: String },

    /// The record is in the wrong state for this operation
    #[error("{message}")]
    InvalidState { message: String },

    /// Field may not be changed after creation
    #[error("{field} cannot be updated")]
    Immutable { field: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// No operation with this op string
    #[error("unknown operation: {op}")]
    UnknownOperation { op: String },

    /// Request could not be parsed
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Storage failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlannerError {
    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a field length error
    pub fn too_long(field: impl Into<String>, max: usize) -> Self {
        Self::FieldTooLong {
            field: field.into(),
            max,
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate name error; `scope` is appended verbatim
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>, scope: &str) -> Self {
        Self::DuplicateName {
            kind: kind.into(),
            name: name.into(),
            scope: scope.to_string(),
        }
    }

    /// Create an unknown reference error
    pub fn unknown(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::UnknownReference {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Create an invalid state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound { .. }
            | Self::TeamNotFound { .. }
            | Self::BoardNotFound { .. }
            | Self::TaskNotFound { .. } => ErrorKind::NotFound,
            Self::Store(_) | Self::Io(_) | Self::Json(_) => ErrorKind::Internal,
            _ => ErrorKind::Validation,
        }
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}
