//! Progress summary endpoint.

use axum::{
  extract::{Query, State},
  Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::db::{self, try_lock, DbPool};
use crate::planner::{summarize, ProgressSummary, SummaryRange};

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
  pub user_id: i64,
  pub range: Option<SummaryRange>,
}

// GET /progress/summary
pub async fn get_progress_summary(
  State(pool): State<DbPool>,
  Query(q): Query<SummaryQuery>,
) -> Result<Json<ProgressSummary>, ApiError> {
  let range = q.range.unwrap_or(SummaryRange::Weekly);
  let bounds = range.resolve(Utc::now());

  let conn = try_lock(&pool)?;
  let activity = db::get_progress_counts(&conn, q.user_id, bounds)?;

  Ok(Json(summarize(
    activity.planned,
    activity.completed,
    &activity.planned_by_difficulty,
    &activity.completed_by_difficulty,
  )))
}
