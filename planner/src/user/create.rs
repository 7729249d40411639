//! CreateUser command

use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::types::{IdSequence, User, UserId};
use crate::validate::{self, NAME_MAX};
use planner_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use planner_store::Collection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// Create a new user
#[operation(verb = "create", noun = "user", description = "Create a new user")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreateUser {
    /// Unique login name
    pub name: String,
    /// Name shown in reports
    pub display_name: String,
}

impl CreateUser {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
        }
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        validate::required("name", &self.name)?;
        validate::required("display_name", &self.display_name)?;
        validate::max_len("name", &self.name, NAME_MAX)?;
        validate::max_len("display_name", &self.display_name, NAME_MAX)?;

        let _lock = ctx.lock(&[Collection::Users]).await;
        let mut users = ctx.read_users().await?;

        if users.values().any(|u| u.name == self.name) {
            return Err(PlannerError::duplicate("user", &self.name, ""));
        }

        let id: UserId = IdSequence::from_keys(users.keys()).next_id()?;
        users.insert(
            id.clone(),
            User::new(id.clone(), &self.name, &self.display_name),
        );
        ctx.write_users(&users).await?;

        info!(user = %id, name = %self.name, "created user");
        Ok(json!({ "id": id }))
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for CreateUser {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        ExecutionResult::logged(self.op_string(), input, self.run(ctx).await, started)
    }
}
