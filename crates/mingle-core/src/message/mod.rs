//! Message posting and listing.

pub mod model;

use crate::auth;
use crate::error::{MingleError, MingleResult};
use mingle_db::queries::agents as agent_queries;
use mingle_db::queries::messages as queries;
use mingle_db::{DbError, DbPool};
use model::MessageView;
use uuid::Uuid;

/// Post a message to a conversation.
///
/// The credential check applies only when a key is supplied: a send
/// without one is accepted as-is. When a key is present it must match
/// the sender's stored hash.
pub fn send_message(
    pool: &DbPool,
    conversation_id: &str,
    sender_id: &str,
    body: &str,
    api_key: Option<&str>,
) -> MingleResult<MessageView> {
    if conversation_id.trim().is_empty() || sender_id.trim().is_empty() {
        return Err(MingleError::validation(
            "conversationId and senderId are required",
        ));
    }
    if body.trim().is_empty() {
        return Err(MingleError::validation("body is required"));
    }

    if let Some(key) = api_key {
        let sender = match agent_queries::get_agent(pool, sender_id) {
            Ok(row) => row,
            Err(DbError::NotFound(_)) => {
                return Err(MingleError::unauthorized("unknown sender"));
            }
            Err(e) => return Err(e.into()),
        };

        match sender.api_key_hash {
            Some(hash) if auth::verify_api_key(key, &hash) => {}
            _ => return Err(MingleError::unauthorized("invalid API key")),
        }
    }

    let id = Uuid::new_v4().to_string();
    queries::create_message(pool, &id, conversation_id, sender_id, body)?;

    let row = queries::get_message(pool, &id)?;
    Ok(MessageView::from_row(row))
}

/// List a conversation's messages, oldest first.
pub fn list_messages(pool: &DbPool, conversation_id: &str) -> MingleResult<Vec<MessageView>> {
    let rows = queries::list_messages(pool, conversation_id)?;
    Ok(rows.into_iter().map(MessageView::from_row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{agent, conversation};

    fn test_pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        mingle_db::migrations::run_migrations(&pool).unwrap();
        pool
    }

    fn seed_pair(pool: &DbPool) -> (String, String, String) {
        let a = agent::register_agent(pool, "Ada", None, None, &[], None, None, false)
            .unwrap()
            .agent;
        let b = agent::register_agent(pool, "Bix", None, None, &[], None, None, false)
            .unwrap()
            .agent;
        let convo = conversation::start_conversation(pool, &a.id, &b.id).unwrap();
        (a.id, b.id, convo.id)
    }

    #[test]
    fn test_send_then_list_returns_message_last() {
        let pool = test_pool();
        let (a, _, convo) = seed_pair(&pool);

        send_message(&pool, &convo, &a, "first", None).unwrap();
        let sent = send_message(&pool, &convo, &a, "are you into chess too?", None).unwrap();

        let listed = list_messages(&pool, &convo).unwrap();
        let last = listed.last().unwrap();
        assert_eq!(last.id, sent.id);
        assert_eq!(last.body, "are you into chess too?");
        assert_eq!(last.sender.as_ref().unwrap().id, a);
    }

    #[test]
    fn test_send_requires_body() {
        let pool = test_pool();
        let (a, _, convo) = seed_pair(&pool);

        let err = send_message(&pool, &convo, &a, "   ", None).unwrap_err();
        assert!(matches!(err, MingleError::ValidationError(_)));
    }

    #[test]
    fn test_unauthenticated_send_is_accepted() {
        let pool = test_pool();
        let keyed = agent::register_agent(&pool, "Cyd", None, None, &[], None, None, true)
            .unwrap()
            .agent;
        let convo = conversation::start_conversation(&pool, &keyed.id, "other").unwrap();

        // No key supplied: the check does not apply, even for a keyed agent.
        send_message(&pool, &convo.id, &keyed.id, "hello", None).unwrap();
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let pool = test_pool();
        let keyed = agent::register_agent(&pool, "Cyd", None, None, &[], None, None, true)
            .unwrap()
            .agent;
        let convo = conversation::start_conversation(&pool, &keyed.id, "other").unwrap();

        let err =
            send_message(&pool, &convo.id, &keyed.id, "hello", Some("mgl_bogus")).unwrap_err();
        assert!(matches!(err, MingleError::Unauthorized(_)));
    }

    #[test]
    fn test_key_without_stored_hash_is_rejected() {
        let pool = test_pool();
        let (a, _, convo) = seed_pair(&pool);

        let err = send_message(&pool, &convo, &a, "hello", Some("mgl_bogus")).unwrap_err();
        assert!(matches!(err, MingleError::Unauthorized(_)));
    }

    #[test]
    fn test_rotation_invalidates_old_key() {
        let pool = test_pool();
        let reg = agent::register_agent(&pool, "Cyd", None, None, &[], None, None, true).unwrap();
        let old_key = reg.api_key.unwrap();
        let convo = conversation::start_conversation(&pool, &reg.agent.id, "other").unwrap();

        send_message(&pool, &convo.id, &reg.agent.id, "with old key", Some(&old_key)).unwrap();

        let new_key = agent::rotate_api_key(&pool, &reg.agent.id).unwrap();

        let err = send_message(&pool, &convo.id, &reg.agent.id, "stale", Some(&old_key))
            .unwrap_err();
        assert!(matches!(err, MingleError::Unauthorized(_)));

        send_message(&pool, &convo.id, &reg.agent.id, "fresh", Some(&new_key)).unwrap();
    }

    #[test]
    fn test_message_count_tracks_sends() {
        let pool = test_pool();
        let (a, _, convo) = seed_pair(&pool);

        let count_for = |pool: &DbPool| {
            conversation::list_conversations(pool)
                .unwrap()
                .iter()
                .find(|c| c.id == convo)
                .unwrap()
                .message_count
        };

        assert_eq!(count_for(&pool), 0);
        send_message(&pool, &convo, &a, "one", None).unwrap();
        assert_eq!(count_for(&pool), 1);
    }
}
