//! ListUsers command

use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::types::Record;
use planner_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List all users
#[operation(verb = "list", noun = "users", description = "List all users")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListUsers {}

impl ListUsers {
    pub fn new() -> Self {
        Self {}
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        let users = ctx
            .read_users()
            .await?
            .values()
            .map(|user| user.to_response())
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(Value::Array(users))
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for ListUsers {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        ExecutionResult::unlogged(self.run(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_user, setup};

    #[tokio::test]
    async fn test_list_users_in_creation_order() {
        let (_temp, ctx) = setup();
        assert_eq!(
            ListUsers::new().execute(&ctx).await.into_result().unwrap(),
            serde_json::json!([])
        );

        create_user(&ctx, "zed").await;
        create_user(&ctx, "amy").await;

        let users = ListUsers::new().execute(&ctx).await.into_result().unwrap();
        let users = users.as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["name"], "zed");
        assert_eq!(users[0]["id"], "user_1");
        assert_eq!(users[1]["name"], "amy");
    }
}
