//! SQLite connection pool.
//!
//! A single connection behind a mutex. SQLite serializes writes anyway,
//! so one connection per process is enough for this workload.

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::debug;

/// Database error types.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Connection(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// SQLite connection pool.
pub struct DbPool {
    conn: Mutex<Connection>,
}

impl DbPool {
    /// Open a database at the given path.
    pub fn open(path: &Path) -> DbResult<Self> {
        debug!(path = %path.display(), "Opening SQLite database");
        let conn = Connection::open(path)?;
        Self::configure(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (used by tests).
    pub fn in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::configure(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Apply standard connection settings.
    ///
    /// The bundled SQLite is compiled with `SQLITE_DEFAULT_FOREIGN_KEYS=1`,
    /// which turns foreign key enforcement on by default. This crate's
    /// queries are written against SQLite's standard default (enforcement
    /// off), so restore that default explicitly here.
    fn configure(conn: &Connection) -> DbResult<()> {
        conn.pragma_update(None, "foreign_keys", false)?;
        Ok(())
    }

    /// Run a closure with a shared reference to the connection.
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> DbResult<T>) -> DbResult<T> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        f(&conn)
    }

    /// Run a closure with a mutable reference to the connection.
    /// Needed by migrations, which take `&mut Connection`.
    pub fn with_conn_mut<T>(&self, f: impl FnOnce(&mut Connection) -> DbResult<T>) -> DbResult<T> {
        let mut conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut conn)
    }
}
