//! Conversation-related database queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::params;

/// Conversation row from database.
#[derive(Debug, Clone)]
pub struct ConversationRow {
    pub id: String,
    pub agent_a: String,
    pub agent_b: String,
    pub status: String,
    pub created_at: String,
}

/// Conversation joined with both participant summaries and its message count.
#[derive(Debug, Clone)]
pub struct ConversationListRow {
    pub id: String,
    pub status: String,
    pub created_at: String,
    pub agent_a_id: String,
    pub agent_a_name: String,
    pub agent_a_avatar_url: Option<String>,
    pub agent_b_id: String,
    pub agent_b_name: String,
    pub agent_b_avatar_url: Option<String>,
    pub message_count: i64,
}

/// Create a new conversation.
///
/// The referenced agents are not checked for existence; the row is
/// inserted as given.
pub fn create_conversation(pool: &DbPool, id: &str, agent_a: &str, agent_b: &str) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO conversations (id, agent_a, agent_b) VALUES (?1, ?2, ?3)",
            params![id, agent_a, agent_b],
        )?;
        Ok(())
    })
}

/// Get a conversation by ID.
pub fn get_conversation(pool: &DbPool, id: &str) -> DbResult<ConversationRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT id, agent_a, agent_b, status, created_at
             FROM conversations WHERE id = ?1",
            params![id],
            |row| {
                Ok(ConversationRow {
                    id: row.get(0)?,
                    agent_a: row.get(1)?,
                    agent_b: row.get(2)?,
                    status: row.get(3)?,
                    created_at: row.get(4)?,
                })
            },
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                DbError::NotFound(format!("Conversation: {}", id))
            }
            e => DbError::Connection(e),
        })
    })
}

/// List conversations with participant summaries and message counts,
/// newest first.
pub fn list_conversations(pool: &DbPool) -> DbResult<Vec<ConversationListRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT c.id, c.status, c.created_at,
                    a.id, a.name, a.avatar_url,
                    b.id, b.name, b.avatar_url,
                    (SELECT COUNT(*) FROM messages m WHERE m.conversation_id = c.id)
             FROM conversations c
             JOIN agents a ON a.id = c.agent_a
             JOIN agents b ON b.id = c.agent_b
             ORDER BY c.created_at DESC, c.rowid DESC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ConversationListRow {
                    id: row.get(0)?,
                    status: row.get(1)?,
                    created_at: row.get(2)?,
                    agent_a_id: row.get(3)?,
                    agent_a_name: row.get(4)?,
                    agent_a_avatar_url: row.get(5)?,
                    agent_b_id: row.get(6)?,
                    agent_b_name: row.get(7)?,
                    agent_b_avatar_url: row.get(8)?,
                    message_count: row.get(9)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    })
}

/// Count conversations with status 'active'.
pub fn count_active_conversations(pool: &DbPool) -> DbResult<i64> {
    pool.with_conn(|conn| {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM conversations WHERE status = 'active'",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    })
}
