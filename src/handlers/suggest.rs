//! Suggestion generation and acceptance endpoints.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::db::{self, try_lock, DbPool, LogOnError};
use crate::domain::{Task, TaskSuggestion};
use crate::planner::{compose_suggestions, rank_weak_areas, SummaryRange};

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
  pub user_id: i64,
  pub range: SummaryRange,
  pub time_available_minutes: i64,
  pub target_band: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
  pub suggestions: Vec<TaskSuggestion>,
}

// POST /progress/ai/generate
pub async fn generate_task_suggestions(
  State(pool): State<DbPool>,
  Json(body): Json<GenerateBody>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
  if body.time_available_minutes < 0 {
    return Err(ApiError::BadRequest(
      "time_available_minutes must be non-negative".to_string(),
    ));
  }

  tracing::debug!(
    user_id = body.user_id,
    range = body.range.as_str(),
    minutes = body.time_available_minutes,
    target_band = body.target_band,
    "generating task suggestions"
  );

  // A failed activity read degrades to no-history ranking rather than
  // failing the whole generation request.
  let weak_areas = {
    let conn = try_lock(&pool)?;
    let counts = db::completed_counts_by_category(&conn, body.user_id)
      .log_warn_default("Failed to load completed-task counts");
    rank_weak_areas(&counts)
  };

  let suggestions = compose_suggestions(
    &weak_areas,
    body.range,
    body.time_available_minutes,
    Utc::now(),
    &mut rand::rng(),
  );

  Ok(Json(SuggestionsResponse { suggestions }))
}

#[derive(Debug, Deserialize)]
pub struct AcceptBody {
  pub user_id: i64,
  pub suggestions: Vec<TaskSuggestion>,
}

#[derive(Debug, Serialize)]
pub struct AcceptedResponse {
  pub tasks: Vec<Task>,
}

// POST /progress/ai/accept
pub async fn accept_task_suggestions(
  State(pool): State<DbPool>,
  Json(body): Json<AcceptBody>,
) -> Result<Json<AcceptedResponse>, ApiError> {
  let mut conn = try_lock(&pool)?;
  let tasks = db::accept_suggestions(&mut conn, body.user_id, &body.suggestions)?;
  Ok(Json(AcceptedResponse { tasks }))
}
