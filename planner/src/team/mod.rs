//! Team commands
//!
//! Membership is stored twice: `team_members` maps a team to its member ids
//! and `user_teams` maps a user to summaries of their teams. Every command
//! here updates both views together.

mod add_members;
mod create;
mod get;
mod list;
mod list_members;
mod remove_members;
mod update;

pub use add_members::AddMembers;
pub use create::CreateTeam;
pub use get::GetTeam;
pub use list::ListTeams;
pub use list_members::ListMembers;
pub use remove_members::RemoveMembers;
pub use update::{TeamPatch, UpdateTeam};

use crate::context::{MembersByTeam, TeamsByUser};
use crate::types::{Team, UserId};

/// Add `user` to both membership views; returns false if already a member
pub(crate) fn join(
    team: &Team,
    user: &UserId,
    members: &mut MembersByTeam,
    user_teams: &mut TeamsByUser,
) -> bool {
    let added = members.entry(team.id.clone()).or_default().insert(user.clone());

    let summaries = user_teams.entry(user.clone()).or_default();
    if !summaries.iter().any(|s| s.id == team.id) {
        summaries.push(team.summary());
    }
    added
}
