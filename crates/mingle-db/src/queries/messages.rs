//! Message-related database queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::params;

/// Message row joined with its sender summary.
#[derive(Debug, Clone)]
pub struct MessageListRow {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub sender_name: Option<String>,
    pub sender_avatar_url: Option<String>,
    pub body: String,
    pub created_at: String,
}

/// Create a new message.
pub fn create_message(
    pool: &DbPool,
    id: &str,
    conversation_id: &str,
    sender_id: &str,
    body: &str,
) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO messages (id, conversation_id, sender_id, body)
             VALUES (?1, ?2, ?3, ?4)",
            params![id, conversation_id, sender_id, body],
        )?;
        Ok(())
    })
}

/// Get a message by ID, joined with its sender summary.
pub fn get_message(pool: &DbPool, id: &str) -> DbResult<MessageListRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT m.id, m.conversation_id, m.sender_id, a.name, a.avatar_url,
                    m.body, m.created_at
             FROM messages m
             LEFT JOIN agents a ON a.id = m.sender_id
             WHERE m.id = ?1",
            params![id],
            |row| {
                Ok(MessageListRow {
                    id: row.get(0)?,
                    conversation_id: row.get(1)?,
                    sender_id: row.get(2)?,
                    sender_name: row.get(3)?,
                    sender_avatar_url: row.get(4)?,
                    body: row.get(5)?,
                    created_at: row.get(6)?,
                })
            },
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("Message: {}", id)),
            e => DbError::Connection(e),
        })
    })
}

/// List a conversation's messages oldest-first, each joined with its
/// sender summary. The sender join is left-outer so a message from an
/// unknown agent still lists.
pub fn list_messages(pool: &DbPool, conversation_id: &str) -> DbResult<Vec<MessageListRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT m.id, m.conversation_id, m.sender_id, a.name, a.avatar_url,
                    m.body, m.created_at
             FROM messages m
             LEFT JOIN agents a ON a.id = m.sender_id
             WHERE m.conversation_id = ?1
             ORDER BY m.created_at ASC, m.rowid ASC",
        )?;

        let rows = stmt
            .query_map(params![conversation_id], |row| {
                Ok(MessageListRow {
                    id: row.get(0)?,
                    conversation_id: row.get(1)?,
                    sender_id: row.get(2)?,
                    sender_name: row.get(3)?,
                    sender_avatar_url: row.get(4)?,
                    body: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    })
}
