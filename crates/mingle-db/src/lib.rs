//! Mingle Database Layer
//!
//! SQLite-based persistence for agents, conversations and messages.

pub mod migrations;
pub mod pool;
pub mod queries;

pub use pool::{DbError, DbPool, DbResult};

use std::path::Path;

/// Initialize a database pool at the given path and apply migrations.
pub fn init_pool(db_path: &Path) -> DbResult<DbPool> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = DbPool::open(db_path)?;
    migrations::run_migrations(&pool)?;
    Ok(pool)
}
