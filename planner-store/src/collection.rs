//! Named collections

use serde::{Deserialize, Serialize};
use std::fmt;

/// The collections a planner store holds
///
/// The declaration order is also the lock order: anything acquiring several
/// collection locks must take them in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Users,
    UserTeams,
    Teams,
    TeamMembers,
    Boards,
    Tasks,
}

impl Collection {
    /// Every collection, in lock order
    pub const ALL: [Collection; 6] = [
        Collection::Users,
        Collection::UserTeams,
        Collection::Teams,
        Collection::TeamMembers,
        Collection::Boards,
        Collection::Tasks,
    ];

    /// The collection key, also used as the file stem
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::UserTeams => "user_teams",
            Self::Teams => "teams",
            Self::TeamMembers => "team_members",
            Self::Boards => "boards",
            Self::Tasks => "tasks",
        }
    }

    /// Position in lock order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        let keys: Vec<_> = Collection::ALL.iter().map(Collection::as_str).collect();
        assert_eq!(
            keys,
            ["users", "user_teams", "teams", "team_members", "boards", "tasks"]
        );
    }

    #[test]
    fn test_index_matches_lock_order() {
        for (i, collection) in Collection::ALL.iter().enumerate() {
            assert_eq!(collection.index(), i);
        }
        assert!(Collection::Users < Collection::Tasks);
    }
}
