//! Study-activity aggregation queries

use chrono::{Duration, Utc};
use rusqlite::{params, Connection, Result};
use std::collections::HashMap;

use crate::config;
use crate::domain::{TaskCategory, TaskDifficulty};
use crate::planner::RangeBounds;

/// Count completed tasks per category over the trailing activity window.
/// Categories with no completions are simply absent from the map.
pub fn completed_counts_by_category(
  conn: &Connection,
  user_id: i64,
) -> Result<HashMap<TaskCategory, i64>> {
  let window_start =
    (Utc::now() - Duration::days(config::ACTIVITY_WINDOW_DAYS)).to_rfc3339();

  let mut stmt = conn.prepare(
    r#"
    SELECT category, COUNT(*)
    FROM tasks
    WHERE user_id = ?1
      AND status = 'completed'
      AND completed_at >= ?2
    GROUP BY category
    "#,
  )?;

  let mut counts = HashMap::new();
  let rows = stmt.query_map(params![user_id, window_start], |row| {
    let category: String = row.get(0)?;
    let count: i64 = row.get(1)?;
    Ok((category, count))
  })?;
  for row in rows {
    let (category, count) = row?;
    if let Some(cat) = TaskCategory::from_str(&category) {
      counts.insert(cat, count);
    }
  }
  Ok(counts)
}

/// Raw counts backing a progress summary: tasks with a due date inside the
/// window, split by completion and difficulty.
#[derive(Debug, Default)]
pub struct RangeActivity {
  pub planned: i64,
  pub completed: i64,
  pub planned_by_difficulty: HashMap<TaskDifficulty, i64>,
  pub completed_by_difficulty: HashMap<TaskDifficulty, i64>,
}

pub fn get_progress_counts(
  conn: &Connection,
  user_id: i64,
  bounds: RangeBounds,
) -> Result<RangeActivity> {
  let from = bounds.from.to_rfc3339();
  let to = bounds.to.to_rfc3339();

  let planned: i64 = conn.query_row(
    r#"
    SELECT COUNT(*)
    FROM tasks
    WHERE user_id = ?1 AND due_at IS NOT NULL AND due_at >= ?2 AND due_at <= ?3
    "#,
    params![user_id, from, to],
    |row| row.get(0),
  )?;

  let completed: i64 = conn.query_row(
    r#"
    SELECT COUNT(*)
    FROM tasks
    WHERE user_id = ?1 AND status = 'completed'
      AND due_at IS NOT NULL AND due_at >= ?2 AND due_at <= ?3
    "#,
    params![user_id, from, to],
    |row| row.get(0),
  )?;

  let planned_by_difficulty = difficulty_counts(
    conn,
    r#"
    SELECT difficulty, COUNT(*)
    FROM tasks
    WHERE user_id = ?1 AND due_at IS NOT NULL AND due_at >= ?2 AND due_at <= ?3
    GROUP BY difficulty
    "#,
    user_id,
    &from,
    &to,
  )?;

  let completed_by_difficulty = difficulty_counts(
    conn,
    r#"
    SELECT difficulty, COUNT(*)
    FROM tasks
    WHERE user_id = ?1 AND status = 'completed'
      AND due_at IS NOT NULL AND due_at >= ?2 AND due_at <= ?3
    GROUP BY difficulty
    "#,
    user_id,
    &from,
    &to,
  )?;

  Ok(RangeActivity {
    planned,
    completed,
    planned_by_difficulty,
    completed_by_difficulty,
  })
}

fn difficulty_counts(
  conn: &Connection,
  sql: &str,
  user_id: i64,
  from: &str,
  to: &str,
) -> Result<HashMap<TaskDifficulty, i64>> {
  let mut stmt = conn.prepare(sql)?;
  let mut counts = HashMap::new();
  let rows = stmt.query_map(params![user_id, from, to], |row| {
    let difficulty: String = row.get(0)?;
    let count: i64 = row.get(1)?;
    Ok((difficulty, count))
  })?;
  for row in rows {
    let (difficulty, count) = row?;
    if let Some(diff) = TaskDifficulty::from_str(&difficulty) {
      counts.insert(diff, count);
    }
  }
  Ok(counts)
}
