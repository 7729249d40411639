//! Turn an op string and a JSON request into a runnable operation

use crate::board::{CloseBoard, CreateBoard, ExportBoard, ListBoards};
use crate::context::PlannerContext;
use crate::error::{PlannerError, Result};
use crate::task::{AddTask, UpdateTaskStatus};
use crate::team::{
    AddMembers, CreateTeam, GetTeam, ListMembers, ListTeams, RemoveMembers, UpdateTeam,
};
use crate::user::{CreateUser, GetUser, ListUsers, UpdateUser, UserTeams};
use planner_operations::{Execute, Operation};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Any operation the planner can run
pub trait PlannerOperation: Operation + Execute<PlannerContext, PlannerError> {}

impl<T> PlannerOperation for T where T: Operation + Execute<PlannerContext, PlannerError> {}

type Parser = fn(Value) -> Result<Box<dyn PlannerOperation>>;

fn parser<T>(request: Value) -> Result<Box<dyn PlannerOperation>>
where
    T: PlannerOperation + DeserializeOwned + 'static,
{
    let op: T = serde_json::from_value(request).map_err(|e| PlannerError::parse(e.to_string()))?;
    Ok(Box::new(op))
}

struct Entry {
    sample: Box<dyn PlannerOperation>,
    parse: Parser,
}

fn entry<T>() -> Entry
where
    T: PlannerOperation + DeserializeOwned + Default + 'static,
{
    Entry {
        sample: Box::new(T::default()),
        parse: parser::<T>,
    }
}

fn registry() -> Vec<Entry> {
    vec![
        entry::<CreateUser>(),
        entry::<ListUsers>(),
        entry::<GetUser>(),
        entry::<UpdateUser>(),
        entry::<UserTeams>(),
        entry::<CreateTeam>(),
        entry::<ListTeams>(),
        entry::<GetTeam>(),
        entry::<UpdateTeam>(),
        entry::<AddMembers>(),
        entry::<RemoveMembers>(),
        entry::<ListMembers>(),
        entry::<CreateBoard>(),
        entry::<CloseBoard>(),
        entry::<ListBoards>(),
        entry::<ExportBoard>(),
        entry::<AddTask>(),
        entry::<UpdateTaskStatus>(),
    ]
}

/// One instance of every operation, for listing names and parameters
pub fn operations() -> Vec<Box<dyn PlannerOperation>> {
    registry().into_iter().map(|e| e.sample).collect()
}

/// Collapse whitespace and case so "Create  User" finds "create user"
fn normalize(op: &str) -> String {
    op.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the operation named by `op` from a JSON request
///
/// An empty request is treated as `{}`.
pub fn parse_operation(op: &str, request: &str) -> Result<Box<dyn PlannerOperation>> {
    let op = normalize(op);
    let entry = registry()
        .into_iter()
        .find(|e| e.sample.op_string() == op)
        .ok_or_else(|| PlannerError::UnknownOperation { op: op.clone() })?;

    let request = request.trim();
    let value: Value = if request.is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(request)
            .map_err(|e| PlannerError::parse(format!("invalid JSON in request: {e}")))?
    };
    if !value.is_object() {
        return Err(PlannerError::parse("request must be a JSON object"));
    }

    (entry.parse)(value)
}
