//! Newtype ids for every record kind
//!
//! Ids look like `<prefix>_<n>` where `n` counts up from 1 per collection.

use crate::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Behaviour shared by all record ids
pub trait EntityId: Clone + Eq + std::hash::Hash + fmt::Display {
    /// Prefix before the underscore, e.g. "user"
    const PREFIX: &'static str;

    /// Wrap an existing id string
    fn from_string(s: impl Into<String>) -> Self;

    /// Borrow the id as a string
    fn as_str(&self) -> &str;

    /// Build the id for sequence number `n`
    fn from_number(n: u64) -> Self {
        Self::from_string(format!("{}_{}", Self::PREFIX, n))
    }

    /// The sequence number, if the id is well formed
    fn number(&self) -> Option<u64> {
        self.as_str()
            .strip_prefix(Self::PREFIX)
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(|n| n.parse().ok())
    }
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create from a string
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Borrow as a string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl EntityId for $name {
            const PREFIX: &'static str = $prefix;

            fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Id of a user, e.g. `user_1`
    UserId,
    "user"
);
define_id!(
    /// Id of a team, e.g. `team_1`
    TeamId,
    "team"
);
define_id!(
    /// Id of a project board, e.g. `board_1`
    BoardId,
    "board"
);
define_id!(
    /// Id of a task, e.g. `task_1`
    TaskId,
    "task"
);

/// Hands out the next id for a collection
///
/// The next number is one more than the largest number among existing keys.
/// Keys that do not match `<prefix>_<n>` are ignored.
#[derive(Debug, Clone)]
pub struct IdSequence<K> {
    last: u64,
    _kind: PhantomData<K>,
}

impl<K: EntityId> IdSequence<K> {
    /// Scan existing keys
    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a K>) -> Self
    where
        K: 'a,
    {
        let last = keys
            .into_iter()
            .filter_map(K::number)
            .max()
            .unwrap_or(0);
        Self {
            last,
            _kind: PhantomData,
        }
    }

    /// Allocate the next id
    ///
    /// Fails once the largest existing number is `u64::MAX`.
    pub fn next_id(&mut self) -> Result<K> {
        self.last = self.last.checked_add(1).ok_or_else(|| {
            PlannerError::invalid_state(format!("{} ids exhausted", K::PREFIX))
        })?;
        Ok(K::from_number(self.last))
    }
}
