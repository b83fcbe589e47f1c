//! Task CRUD endpoints.

use axum::{
  extract::{Path, Query, State},
  Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::db::{self, try_lock, DbPool};
use crate::domain::{Task, TaskCategory, TaskDifficulty, TaskStatus};
use crate::planner::SummaryRange;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
  pub user_id: i64,
  pub range: Option<SummaryRange>,
  pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TasksResponse {
  pub tasks: Vec<Task>,
}

/// Map the wire status filter to a stored status. "all", absence, and
/// unknown values mean no filter, matching the original client contract.
fn map_status_filter(status: Option<&str>) -> Option<TaskStatus> {
  match status {
    Some("planned") => Some(TaskStatus::Planned),
    Some("in-progress") => Some(TaskStatus::InProgress),
    Some("completed") => Some(TaskStatus::Completed),
    _ => None,
  }
}

// GET /progress/tasks
pub async fn list_tasks(
  State(pool): State<DbPool>,
  Query(q): Query<ListTasksQuery>,
) -> Result<Json<TasksResponse>, ApiError> {
  let range = q.range.unwrap_or(SummaryRange::Weekly);
  let bounds = range.resolve(Utc::now());
  let status = map_status_filter(q.status.as_deref());

  let conn = try_lock(&pool)?;
  let tasks = db::list_tasks(&conn, q.user_id, bounds, status)?;
  Ok(Json(TasksResponse { tasks }))
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
  pub user_id: i64,
  pub name: String,
  pub category: TaskCategory,
  pub difficulty: TaskDifficulty,
  pub estimated_minutes: Option<i64>,
  pub due_at: Option<DateTime<Utc>>,
}

// POST /progress/tasks
pub async fn create_task(
  State(pool): State<DbPool>,
  Json(body): Json<CreateTaskBody>,
) -> Result<Json<Task>, ApiError> {
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("name required".to_string()));
  }

  let new = db::NewTask {
    user_id: body.user_id,
    name: body.name,
    category: body.category,
    difficulty: body.difficulty,
    estimated_minutes: body
      .estimated_minutes
      .unwrap_or(config::DEFAULT_ESTIMATED_MINUTES),
    due_at: body.due_at,
  };

  let conn = try_lock(&pool)?;
  let task = db::insert_task(&conn, &new)?;
  Ok(Json(task))
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskBody {
  pub progress: Option<i64>,
  pub status: Option<TaskStatus>,
  pub completed_at: Option<DateTime<Utc>>,
}

// PATCH /progress/tasks/{id}
pub async fn update_task(
  State(pool): State<DbPool>,
  Path(id): Path<i64>,
  Json(body): Json<UpdateTaskBody>,
) -> Result<Json<Task>, ApiError> {
  if let Some(progress) = body.progress {
    if !(0..=100).contains(&progress) {
      return Err(ApiError::BadRequest("progress must be 0..=100".to_string()));
    }
  }

  let conn = try_lock(&pool)?;
  match db::update_task(&conn, id, body.progress, body.status, body.completed_at)? {
    Some(task) => Ok(Json(task)),
    None => Err(ApiError::NotFound("task")),
  }
}

// DELETE /progress/tasks/{id}
pub async fn delete_task(
  State(pool): State<DbPool>,
  Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
  let conn = try_lock(&pool)?;
  if db::delete_task(&conn, id)? {
    Ok(Json(serde_json::json!({ "ok": true })))
  } else {
    Err(ApiError::NotFound("task"))
  }
}
