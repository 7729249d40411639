//! Shared helpers for tests
//!
//! Each helper runs the real operation and panics on failure, so tests can
//! build fixtures in one line and focus on the behaviour under test.

use crate::board::CreateBoard;
use crate::context::PlannerContext;
use crate::task::AddTask;
use crate::team::{AddMembers, CreateTeam};
use crate::types::{BoardId, TaskId, TeamId, UserId};
use crate::user::CreateUser;
use planner_operations::Execute;
use serde_json::Value;
use tempfile::TempDir;

/// An in-memory context whose reports go to a fresh temporary directory
pub fn setup() -> (TempDir, PlannerContext) {
    let temp = TempDir::new().expect("create temp dir");
    let ctx = PlannerContext::in_memory(temp.path().join("out"));
    (temp, ctx)
}

fn id_of(result: Value) -> String {
    result["id"]
        .as_str()
        .expect("operation returned an id")
        .to_string()
}

/// Create a user whose display name equals `name`
pub async fn create_user(ctx: &PlannerContext, name: &str) -> UserId {
    let result = CreateUser::new(name, name)
        .execute(ctx)
        .await
        .into_result()
        .expect("create user");
    UserId::from(id_of(result))
}

pub async fn create_team(ctx: &PlannerContext, name: &str, admin: &UserId) -> TeamId {
    let result = CreateTeam::new(name, format!("{name} team"), admin.clone())
        .execute(ctx)
        .await
        .into_result()
        .expect("create team");
    TeamId::from(id_of(result))
}

pub async fn add_members(ctx: &PlannerContext, team: &TeamId, users: &[UserId]) {
    AddMembers::new(team.clone(), users.iter().cloned())
        .execute(ctx)
        .await
        .into_result()
        .expect("add members");
}

pub async fn create_board(ctx: &PlannerContext, name: &str, team: &TeamId) -> BoardId {
    let result = CreateBoard::new(name, format!("{name} board"), team.clone())
        .execute(ctx)
        .await
        .into_result()
        .expect("create board");
    BoardId::from(id_of(result))
}

pub async fn add_task(ctx: &PlannerContext, title: &str, user: &UserId, board: &BoardId) -> TaskId {
    let result = AddTask::new(title, format!("{title} details"), user.clone(), board.clone())
        .execute(ctx)
        .await
        .into_result()
        .expect("add task");
    TaskId::from(id_of(result))
}
