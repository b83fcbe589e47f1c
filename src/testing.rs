//! Test utilities for database setup.
//!
//! Provides helpers that reuse authoritative schema initialization,
//! eliminating schema duplication in test code.

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::db::DbPool;

/// Test environment with a planner database using the authoritative schema.
///
/// Keeps the temporary directory alive for the lifetime of the connection,
/// ensuring automatic cleanup when dropped.
pub struct TestEnv {
  /// Temporary directory (kept alive for database file persistence)
  pub temp: TempDir,
  /// planner.db connection with the full schema (all migrations)
  pub conn: Connection,
}

impl TestEnv {
  /// Create a test environment with the database initialized via
  /// `crate::db::schema::run_migrations()`.
  pub fn new() -> rusqlite::Result<Self> {
    let temp =
      TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let db_path = temp.path().join("planner.db");
    let conn = Connection::open(&db_path)?;
    crate::db::schema::run_migrations(&conn)?;

    Ok(Self { temp, conn })
  }

  /// Get the temporary directory path for creating test files.
  pub fn path(&self) -> &Path {
    self.temp.path()
  }
}

/// Build a `DbPool` backed by an in-memory database with the full schema,
/// for route-level tests that need to share a connection with a router.
pub fn test_pool() -> DbPool {
  let conn = Connection::open_in_memory().expect("in-memory database");
  crate::db::schema::run_migrations(&conn).expect("migrations");
  Arc::new(Mutex::new(conn))
}
