pub mod suggest;
pub mod summary;
pub mod tasks;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::{get, post},
  Json, Router,
};
use serde_json::json;

use crate::db::{DbLockError, DbPool};

pub use suggest::{accept_task_suggestions, generate_task_suggestions};
pub use summary::get_progress_summary;
pub use tasks::{create_task, delete_task, list_tasks, update_task};

/// Error surfaced to API clients as a JSON body with a matching status code.
#[derive(Debug)]
pub enum ApiError {
  BadRequest(String),
  NotFound(&'static str),
  Unavailable,
  Db(rusqlite::Error),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
      Self::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
      Self::Unavailable => (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable".to_string()),
      Self::Db(e) => {
        tracing::error!("Database error: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "database error".to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

impl From<rusqlite::Error> for ApiError {
  fn from(e: rusqlite::Error) -> Self {
    Self::Db(e)
  }
}

impl From<DbLockError> for ApiError {
  fn from(_: DbLockError) -> Self {
    Self::Unavailable
  }
}

/// API routes. Shared between `main` and route-level tests.
pub fn router(pool: DbPool) -> Router {
  Router::new()
    .route("/progress/summary", get(get_progress_summary))
    .route("/progress/tasks", get(list_tasks).post(create_task))
    .route(
      "/progress/tasks/{id}",
      axum::routing::patch(update_task).delete(delete_task),
    )
    .route("/progress/ai/generate", post(generate_task_suggestions))
    .route("/progress/ai/accept", post(accept_task_suggestions))
    .with_state(pool)
}
