//! Task CRUD and query operations

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::{Task, TaskCategory, TaskDifficulty, TaskStatus, TaskSuggestion};
use crate::planner::RangeBounds;

const TASK_COLUMNS: &str = "id, user_id, name, category, difficulty, status, estimated_minutes, \
                            progress, due_at, created_at, updated_at, completed_at";

/// Fields for a task being created directly by a user.
#[derive(Debug, Clone)]
pub struct NewTask {
  pub user_id: i64,
  pub name: String,
  pub category: TaskCategory,
  pub difficulty: TaskDifficulty,
  pub estimated_minutes: i64,
  pub due_at: Option<DateTime<Utc>>,
}

pub fn insert_task(conn: &Connection, new: &NewTask) -> Result<Task> {
  let now = Utc::now().to_rfc3339();
  conn.execute(
    r#"
    INSERT INTO tasks (user_id, name, category, difficulty, status, estimated_minutes,
                       progress, due_at, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, 'planned', ?5, 0, ?6, ?7, ?7)
    "#,
    params![
      new.user_id,
      new.name,
      new.category.as_str(),
      new.difficulty.as_str(),
      new.estimated_minutes,
      new.due_at.map(|d| d.to_rfc3339()),
      now,
    ],
  )?;
  let id = conn.last_insert_rowid();
  get_task_by_id(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

pub fn get_task_by_id(conn: &Connection, id: i64) -> Result<Option<Task>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {} FROM tasks WHERE id = ?1",
    TASK_COLUMNS
  ))?;

  let mut rows = stmt.query(params![id])?;
  if let Some(row) = rows.next()? {
    Ok(Some(row_to_task(row)?))
  } else {
    Ok(None)
  }
}

/// Tasks for a user whose due date falls in the range (or is unset),
/// optionally filtered by status. Ordered by effective due date, newest
/// created first among equals.
pub fn list_tasks(
  conn: &Connection,
  user_id: i64,
  bounds: RangeBounds,
  status: Option<TaskStatus>,
) -> Result<Vec<Task>> {
  let from = bounds.from.to_rfc3339();
  let to = bounds.to.to_rfc3339();

  if let Some(status) = status {
    let mut stmt = conn.prepare(&format!(
      r#"
      SELECT {}
      FROM tasks
      WHERE user_id = ?1
        AND (due_at IS NULL OR (due_at >= ?2 AND due_at <= ?3))
        AND status = ?4
      ORDER BY COALESCE(due_at, created_at) ASC, created_at DESC
      "#,
      TASK_COLUMNS
    ))?;
    let tasks = stmt
      .query_map(params![user_id, from, to, status.as_str()], row_to_task)?
      .collect::<Result<Vec<_>>>()?;
    Ok(tasks)
  } else {
    let mut stmt = conn.prepare(&format!(
      r#"
      SELECT {}
      FROM tasks
      WHERE user_id = ?1
        AND (due_at IS NULL OR (due_at >= ?2 AND due_at <= ?3))
      ORDER BY COALESCE(due_at, created_at) ASC, created_at DESC
      "#,
      TASK_COLUMNS
    ))?;
    let tasks = stmt
      .query_map(params![user_id, from, to], row_to_task)?
      .collect::<Result<Vec<_>>>()?;
    Ok(tasks)
  }
}

/// Partial update. Absent fields keep their stored values (COALESCE).
/// Returns None when no task with that id exists.
pub fn update_task(
  conn: &Connection,
  id: i64,
  progress: Option<i64>,
  status: Option<TaskStatus>,
  completed_at: Option<DateTime<Utc>>,
) -> Result<Option<Task>> {
  let updated = conn.execute(
    r#"
    UPDATE tasks
    SET progress = COALESCE(?1, progress),
        status = COALESCE(?2, status),
        completed_at = COALESCE(?3, completed_at),
        updated_at = ?4
    WHERE id = ?5
    "#,
    params![
      progress,
      status.map(|s| s.as_str()),
      completed_at.map(|d| d.to_rfc3339()),
      Utc::now().to_rfc3339(),
      id,
    ],
  )?;

  if updated == 0 {
    return Ok(None);
  }
  get_task_by_id(conn, id)
}

/// Returns false when no task with that id existed.
pub fn delete_task(conn: &Connection, id: i64) -> Result<bool> {
  let deleted = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
  Ok(deleted > 0)
}

/// Persist accepted suggestions as planned tasks, all-or-nothing.
///
/// The inserts run inside one transaction so a mid-batch failure cannot leave
/// a partial subset of the accepted plan behind.
pub fn accept_suggestions(
  conn: &mut Connection,
  user_id: i64,
  suggestions: &[TaskSuggestion],
) -> Result<Vec<Task>> {
  let now = Utc::now().to_rfc3339();
  let tx = conn.transaction()?;
  let mut ids = Vec::with_capacity(suggestions.len());

  for s in suggestions {
    tx.execute(
      r#"
      INSERT INTO tasks (user_id, name, category, difficulty, status, estimated_minutes,
                         progress, due_at, created_at, updated_at)
      VALUES (?1, ?2, ?3, ?4, 'planned', ?5, 0, ?6, ?7, ?7)
      "#,
      params![
        user_id,
        s.name,
        s.category.as_str(),
        s.difficulty.as_str(),
        s.estimated_minutes,
        s.due_at.map(|d| d.to_rfc3339()),
        now,
      ],
    )?;
    ids.push(tx.last_insert_rowid());
  }

  let mut tasks = Vec::with_capacity(ids.len());
  for id in &ids {
    if let Some(task) = get_task_by_id_tx(&tx, *id)? {
      tasks.push(task);
    }
  }
  tx.commit()?;
  Ok(tasks)
}

fn get_task_by_id_tx(tx: &rusqlite::Transaction, id: i64) -> Result<Option<Task>> {
  let mut stmt = tx.prepare(&format!(
    "SELECT {} FROM tasks WHERE id = ?1",
    TASK_COLUMNS
  ))?;
  let mut rows = stmt.query(params![id])?;
  if let Some(row) = rows.next()? {
    Ok(Some(row_to_task(row)?))
  } else {
    Ok(None)
  }
}

fn invalid_text(idx: usize) -> rusqlite::Error {
  rusqlite::Error::InvalidColumnType(idx, "tasks".to_string(), rusqlite::types::Type::Text)
}

/// Convert a database row to Task
fn row_to_task(row: &rusqlite::Row) -> Result<Task> {
  let category_str: String = row.get(3)?;
  let difficulty_str: String = row.get(4)?;
  let status_str: String = row.get(5)?;
  let due_at_str: Option<String> = row.get(8)?;
  let created_at_str: String = row.get(9)?;
  let updated_at_str: String = row.get(10)?;
  let completed_at_str: Option<String> = row.get(11)?;

  Ok(Task {
    id: row.get(0)?,
    user_id: row.get(1)?,
    name: row.get(2)?,
    category: TaskCategory::from_str(&category_str).ok_or_else(|| invalid_text(3))?,
    difficulty: TaskDifficulty::from_str(&difficulty_str).ok_or_else(|| invalid_text(4))?,
    status: TaskStatus::from_str(&status_str).ok_or_else(|| invalid_text(5))?,
    estimated_minutes: row.get(6)?,
    progress: row.get(7)?,
    due_at: due_at_str.and_then(|s| parse_instant(&s)),
    created_at: parse_instant(&created_at_str).unwrap_or_else(Utc::now),
    updated_at: parse_instant(&updated_at_str).unwrap_or_else(Utc::now),
    completed_at: completed_at_str.and_then(|s| parse_instant(&s)),
  })
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .ok()
    .map(|dt| dt.with_timezone(&Utc))
}
