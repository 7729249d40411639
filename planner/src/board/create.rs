//! CreateBoard command

use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::lookup::TeamLookup;
use crate::types::{Board, BoardId, IdSequence, TeamId};
use crate::validate::{self, DESCRIPTION_MAX, NAME_MAX};
use planner_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use planner_store::Collection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

/// Open a new project board for a team
#[operation(verb = "create", noun = "board", description = "Open a new project board for a team")]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreateBoard {
    /// Board name, unique within the team
    pub name: String,
    /// What the board tracks
    pub description: String,
    /// Owning team id
    pub team_id: TeamId,
}

impl CreateBoard {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        team_id: impl Into<TeamId>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            team_id: team_id.into(),
        }
    }

    async fn run(&self, ctx: &PlannerContext) -> Result<Value> {
        validate::required("name", &self.name)?;
        validate::required("description", &self.description)?;
        validate::required("team_id", self.team_id.as_str())?;
        validate::max_len("name", &self.name, NAME_MAX)?;
        validate::max_len("description", &self.description, DESCRIPTION_MAX)?;

        let _lock = ctx.lock(&[Collection::Teams, Collection::Boards]).await;

        if !ctx.team_exists(&self.team_id).await? {
            return Err(PlannerError::unknown("team", self.team_id.as_str()));
        }

        let mut boards = ctx.read_boards().await?;
        if boards
            .values()
            .any(|b| b.team_id == self.team_id && b.name == self.name)
        {
            return Err(PlannerError::duplicate("board", &self.name, " for this team"));
        }

        let id: BoardId = IdSequence::from_keys(boards.keys()).next_id()?;
        boards.insert(
            id.clone(),
            Board::new(id.clone(), &self.name, &self.description, self.team_id.clone()),
        );
        ctx.write_boards(&boards).await?;

        info!(board = %id, team = %self.team_id, "created board");
        Ok(json!({ "id": id }))
    }
}

#[async_trait]
impl Execute<PlannerContext, PlannerError> for CreateBoard {
    async fn execute(&self, ctx: &PlannerContext) -> ExecutionResult<Value, PlannerError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        ExecutionResult::logged(self.op_string(), input, self.run(ctx).await, started)
    }
}
