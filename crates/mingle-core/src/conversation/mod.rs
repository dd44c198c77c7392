//! Conversation lifecycle.

pub mod model;

use crate::error::{MingleError, MingleResult};
use mingle_db::queries::conversations as queries;
use mingle_db::{DbError, DbPool};
use model::{Conversation, ConversationSummary};
use uuid::Uuid;

/// Start a conversation between two agents.
///
/// The participant IDs are taken as given and not checked against the
/// agents table; a conversation referencing an unknown agent simply
/// never shows up in listings.
pub fn start_conversation(pool: &DbPool, agent_a: &str, agent_b: &str) -> MingleResult<Conversation> {
    if agent_a.trim().is_empty() || agent_b.trim().is_empty() {
        return Err(MingleError::validation("both agent IDs are required"));
    }

    let id = Uuid::new_v4().to_string();
    queries::create_conversation(pool, &id, agent_a, agent_b)?;

    let row = queries::get_conversation(pool, &id)?;
    Ok(Conversation::from_row(row))
}

/// Get a conversation by ID.
pub fn get_conversation(pool: &DbPool, id: &str) -> MingleResult<Conversation> {
    match queries::get_conversation(pool, id) {
        Ok(row) => Ok(Conversation::from_row(row)),
        Err(DbError::NotFound(_)) => Err(MingleError::ConversationNotFound(id.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// List all conversations with participant summaries and message counts.
pub fn list_conversations(pool: &DbPool) -> MingleResult<Vec<ConversationSummary>> {
    let rows = queries::list_conversations(pool)?;
    Ok(rows.into_iter().map(ConversationSummary::from_row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent;

    fn test_pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        mingle_db::migrations::run_migrations(&pool).unwrap();
        pool
    }

    #[test]
    fn test_start_and_list() {
        let pool = test_pool();

        let a = agent::register_agent(
            &pool,
            "Ada",
            None,
            None,
            &[],
            None,
            Some("https://example.com/ada.png"),
            false,
        )
        .unwrap()
        .agent;
        let b = agent::register_agent(&pool, "Bix", None, None, &[], None, None, false)
            .unwrap()
            .agent;

        let convo = start_conversation(&pool, &a.id, &b.id).unwrap();

        let listed = list_conversations(&pool).unwrap();
        let entry = listed.iter().find(|c| c.id == convo.id).unwrap();

        assert_eq!(entry.agent_a.name, "Ada");
        assert_eq!(
            entry.agent_a.avatar_url.as_deref(),
            Some("https://example.com/ada.png")
        );
        assert_eq!(entry.agent_b.name, "Bix");
        assert_eq!(entry.agent_b.avatar_url, None);
        assert_eq!(entry.message_count, 0);
    }

    #[test]
    fn test_start_requires_both_ids() {
        let pool = test_pool();

        let err = start_conversation(&pool, "a-1", "").unwrap_err();
        assert!(matches!(err, MingleError::ValidationError(_)));
    }

    #[test]
    fn test_start_does_not_check_agent_existence() {
        let pool = test_pool();

        // Participants are not validated against the agents table.
        let convo = start_conversation(&pool, "ghost-1", "ghost-2").unwrap();
        assert_eq!(get_conversation(&pool, &convo.id).unwrap().agent_a, "ghost-1");

        // But the join-based listing skips conversations with unknown agents.
        assert!(list_conversations(&pool).unwrap().is_empty());
    }
}
