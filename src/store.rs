//! SQLite persistence for tasks.
//!
//! A single `task` table holds every task. Each call runs one statement in
//! autocommit mode, so a successful return means the change is on disk.

use crate::error::StoreError;
use crate::task::{Filter, Task, TaskStatus};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, error, info};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS task (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    status TEXT NOT NULL
)";

/// Handle on the task database.
///
/// A store whose database could not be opened stays usable as a value: every
/// operation on it returns [`StoreError::Unavailable`].
pub struct Store {
    conn: Option<Connection>,
}

impl Store {
    /// Open or create the database at the given path and make sure the
    /// `task` table exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    /// Startup entry point. Falls back to an unavailable store when the
    /// database cannot be opened.
    pub fn initialize<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(store) => {
                info!(path = %path.display(), "task table ready");
                store
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "failed to open task database");
                Self::unavailable()
            }
        }
    }

    pub fn unavailable() -> Self {
        Self { conn: None }
    }

    pub fn is_available(&self) -> bool {
        self.conn.is_some()
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(CREATE_TABLE)?;
        Ok(Self { conn: Some(conn) })
    }

    fn conn(&self) -> Result<&Connection, StoreError> {
        self.conn.as_ref().ok_or(StoreError::Unavailable)
    }

    /// Append a task and return its id.
    pub fn insert(&self, name: &str, status: TaskStatus) -> Result<i64, StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO task (name, status) VALUES (?1, ?2)",
            params![name, status.as_str()],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, name, %status, "inserted task");
        Ok(id)
    }

    /// Set the status of every task with this name. Returns the number of
    /// rows changed.
    pub fn update_status_by_name(
        &self,
        name: &str,
        status: TaskStatus,
    ) -> Result<usize, StoreError> {
        let changed = self.conn()?.execute(
            "UPDATE task SET status = ?1 WHERE name = ?2",
            params![status.as_str(), name],
        )?;
        debug!(name, %status, changed, "updated task status");
        Ok(changed)
    }

    /// Remove the task with this id. Missing ids are a no-op.
    pub fn delete_by_id(&self, id: i64) -> Result<usize, StoreError> {
        let removed = self
            .conn()?
            .execute("DELETE FROM task WHERE id = ?1", params![id])?;
        debug!(id, removed, "deleted task");
        Ok(removed)
    }

    /// Tasks matching the filter, in insertion order.
    pub fn select(&self, filter: Filter) -> Result<Vec<Task>, StoreError> {
        let conn = self.conn()?;
        let rows = match filter.status() {
            None => {
                let mut stmt = conn.prepare("SELECT id, name, status FROM task ORDER BY id")?;
                let rows = stmt
                    .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
                    .collect::<Result<Vec<(i64, String, String)>, _>>()?;
                rows
            }
            Some(status) => {
                let mut stmt = conn
                    .prepare("SELECT id, name, status FROM task WHERE status = ?1 ORDER BY id")?;
                let rows = stmt
                    .query_map(params![status.as_str()], |row| {
                        Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                    })?
                    .collect::<Result<Vec<(i64, String, String)>, _>>()?;
                rows
            }
        };

        rows.into_iter()
            .map(|(id, name, value)| -> Result<Task, StoreError> {
                let status = value
                    .parse()
                    .map_err(|_| StoreError::InvalidStatus { id, value })?;
                Ok(Task { id, name, status })
            })
            .collect()
    }
}
