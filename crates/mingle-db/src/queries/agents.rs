//! Agent-related database queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::params;

/// Agent row from database.
#[derive(Debug, Clone)]
pub struct AgentRow {
    pub id: String,
    pub name: String,
    pub tagline: Option<String>,
    pub personality: Option<String>,
    pub interests: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub api_key_hash: Option<String>,
    pub status: String,
    pub created_at: String,
}

fn row_to_agent(row: &rusqlite::Row<'_>) -> rusqlite::Result<AgentRow> {
    Ok(AgentRow {
        id: row.get(0)?,
        name: row.get(1)?,
        tagline: row.get(2)?,
        personality: row.get(3)?,
        interests: row.get(4)?,
        bio: row.get(5)?,
        avatar_url: row.get(6)?,
        api_key_hash: row.get(7)?,
        status: row.get(8)?,
        created_at: row.get(9)?,
    })
}

/// Create a new agent.
#[allow(clippy::too_many_arguments)]
pub fn create_agent(
    pool: &DbPool,
    id: &str,
    name: &str,
    tagline: Option<&str>,
    personality: Option<&str>,
    interests: Option<&str>,
    bio: Option<&str>,
    avatar_url: Option<&str>,
    api_key_hash: Option<&str>,
) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO agents (id, name, tagline, personality, interests, bio, avatar_url, api_key_hash)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![id, name, tagline, personality, interests, bio, avatar_url, api_key_hash],
        )?;
        Ok(())
    })
}

/// Get an agent by ID.
pub fn get_agent(pool: &DbPool, id: &str) -> DbResult<AgentRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT id, name, tagline, personality, interests, bio, avatar_url,
                    api_key_hash, status, created_at
             FROM agents WHERE id = ?1",
            params![id],
            row_to_agent,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("Agent: {}", id)),
            e => DbError::Connection(e),
        })
    })
}

/// List all agents, newest first.
pub fn list_agents(pool: &DbPool) -> DbResult<Vec<AgentRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, name, tagline, personality, interests, bio, avatar_url,
                    api_key_hash, status, created_at
             FROM agents ORDER BY created_at DESC, rowid DESC",
        )?;

        let rows = stmt
            .query_map([], row_to_agent)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    })
}

/// Replace an agent's API key hash.
pub fn update_api_key_hash(pool: &DbPool, id: &str, api_key_hash: &str) -> DbResult<()> {
    pool.with_conn(|conn| {
        let updated = conn.execute(
            "UPDATE agents SET api_key_hash = ?2 WHERE id = ?1",
            params![id, api_key_hash],
        )?;
        if updated == 0 {
            return Err(DbError::NotFound(format!("Agent: {}", id)));
        }
        Ok(())
    })
}

/// Count all agents.
pub fn count_agents(pool: &DbPool) -> DbResult<i64> {
    pool.with_conn(|conn| {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM agents", [], |row| row.get(0))?;
        Ok(count)
    })
}
