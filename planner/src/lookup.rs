//! Cross-entity existence checks
//!
//! Team, board and task operations only ever ask about users and teams
//! through these traits, never by reading those collections directly.

use crate::context::PlannerContext;
use crate::error::Result;
use crate::types::{Team, TeamId, User, UserId};
use async_trait::async_trait;
use indexmap::{IndexMap, IndexSet};

/// Questions other operations may ask about users
#[async_trait]
pub trait UserLookup {
    async fn user_exists(&self, id: &UserId) -> Result<bool>;

    async fn find_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self.find_users(std::slice::from_ref(id)).await?.swap_remove(id))
    }

    /// Resolve a batch of ids; ids without a user are left out
    async fn find_users(&self, ids: &[UserId]) -> Result<IndexMap<UserId, User>>;
}

/// Questions other operations may ask about teams
#[async_trait]
pub trait TeamLookup {
    async fn find_team(&self, id: &TeamId) -> Result<Option<Team>>;

    async fn team_exists(&self, id: &TeamId) -> Result<bool> {
        Ok(self.find_team(id).await?.is_some())
    }

    /// Current member ids; an unknown team has none
    async fn team_members(&self, id: &TeamId) -> Result<IndexSet<UserId>>;
}

#[async_trait]
impl UserLookup for PlannerContext {
    async fn user_exists(&self, id: &UserId) -> Result<bool> {
        Ok(self.read_users().await?.contains_key(id))
    }

    async fn find_users(&self, ids: &[UserId]) -> Result<IndexMap<UserId, User>> {
        let mut users = self.read_users().await?;
        Ok(ids
            .iter()
            .filter_map(|id| users.swap_remove_entry(id))
            .collect())
    }
}

#[async_trait]
impl TeamLookup for PlannerContext {
    async fn find_team(&self, id: &TeamId) -> Result<Option<Team>> {
        Ok(self.read_teams().await?.swap_remove(id))
    }

    async fn team_members(&self, id: &TeamId) -> Result<IndexSet<UserId>> {
        Ok(self
            .read_team_members()
            .await?
            .swap_remove(id)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{add_members, create_team, create_user, setup};

    #[tokio::test]
    async fn test_user_lookup() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;

        assert!(ctx.user_exists(&ana).await.unwrap());
        assert!(!ctx.user_exists(&UserId::from("user_99")).await.unwrap());

        let found = ctx
            .find_users(&[UserId::from("user_99"), ana.clone(), ana.clone()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[&ana].name, "ana");

        assert_eq!(ctx.find_user(&ana).await.unwrap().unwrap().id, ana);
        assert!(ctx.find_user(&UserId::from("user_99")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_team_lookup() {
        let (_temp, ctx) = setup();
        let ana = create_user(&ctx, "ana").await;
        let bo = create_user(&ctx, "bo").await;
        let team = create_team(&ctx, "core", &ana).await;
        add_members(&ctx, &team, &[bo.clone()]).await;

        assert!(ctx.team_exists(&team).await.unwrap());
        assert!(!ctx.team_exists(&TeamId::from("team_42")).await.unwrap());

        let members = ctx.team_members(&team).await.unwrap();
        assert!(members.contains(&ana));
        assert!(members.contains(&bo));
        assert!(ctx.team_members(&TeamId::from("team_42")).await.unwrap().is_empty());
    }
}
