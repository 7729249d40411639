//! UpdateUser command

use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::types::UserId;
use crate::validate::{self, DISPLAY_NAME_UPDATE_MAX};
use planner_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use planner_store::Collection;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// Fields a caller may send for a user
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Never accepted; kept so that its mere presence can be rejected
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Value>,
}

/// `Some` whenever the key appears, even as `null`
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Update a user's display name
#[operation(verb = "update", noun = "user", description = "Update a user's display name")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateUser {
    /// The user id
    pub id: UserId,
    /// Changes to apply
    #[serde(default)]
    pub user: UserPatch,
}

impl UpdateUser {
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            user: UserPatch::default(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.user.display_name = Some(display_name.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.user.name = Some(Value::String(name.into()));
        self
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        let _lock = ctx.lock(&[Collection::Users]).await;
        let mut users = ctx.read_users().await?;
        let user = users
            .get_mut(&self.id)
            .ok_or_else(|| PlannerError::UserNotFound {
                id: self.id.to_string(),
            })?;

        if self.user.name.is_some() {
            return Err(PlannerError::Immutable {
                field: "name".into(),
            });
        }

        match self.user.display_name.as_deref() {
            Some(display_name) if !display_name.is_empty() => {
                validate::max_len("display_name", display_name, DISPLAY_NAME_UPDATE_MAX)?;
                user.display_name = display_name.to_string();
                ctx.write_users(&users).await?;
                info!(user = %self.id, "updated user");
            }
            _ => {}
        }

        Ok(json!({ "message": "User updated successfully" }))
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for UpdateUser {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        ExecutionResult::logged(self.op_string(), input, self.run(ctx).await, started)
    }
}
