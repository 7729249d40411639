//! GetUser command

use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::types::{Record, UserId};
use planner_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Get a user by id
#[operation(verb = "get", noun = "user", description = "Get a user by id")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GetUser {
    /// The user id
    pub id: UserId,
}

impl GetUser {
    pub fn new(id: impl Into<UserId>) -> Self {
        Self { id: id.into() }
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        Ok(ctx.read_user(&self.id).await?.to_response()?)
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for GetUser {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        ExecutionResult::unlogged(self.run(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_user, setup};

    #[tokio::test]
    async fn test_get_user() {
        let (_temp, ctx) = setup();
        let id = create_user(&ctx, "ana").await;

        let result = GetUser::new(id.clone()).execute(&ctx).await;
        assert!(!result.should_log());
        let user = result.into_result().unwrap();
        assert_eq!(user["id"], id.as_str());
        assert_eq!(user["name"], "ana");
        assert!(user["creation_time"].is_string());
    }

    #[tokio::test]
    async fn test_get_unknown_user() {
        let (_temp, ctx) = setup();
        let err = GetUser::new("user_3").execute(&ctx).await.into_result().unwrap_err();
        assert!(err.is_not_found());
    }
}
