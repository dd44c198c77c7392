//! Agent registration and credential management.

pub mod model;

use crate::auth;
use crate::error::{MingleError, MingleResult};
use mingle_db::queries::agents as queries;
use mingle_db::{DbError, DbPool};
use model::Agent;
use tracing::debug;
use uuid::Uuid;

/// A completed registration: the stored agent plus the plaintext API key
/// when one was requested. The key is not recoverable afterwards.
#[derive(Debug)]
pub struct Registration {
    pub agent: Agent,
    pub api_key: Option<String>,
}

/// Register a new agent.
#[allow(clippy::too_many_arguments)]
pub fn register_agent(
    pool: &DbPool,
    name: &str,
    tagline: Option<&str>,
    personality: Option<&str>,
    interests: &[String],
    bio: Option<&str>,
    avatar_url: Option<&str>,
    generate_key: bool,
) -> MingleResult<Registration> {
    if name.trim().is_empty() {
        return Err(MingleError::validation("name is required"));
    }

    let id = Uuid::new_v4().to_string();
    let api_key = generate_key.then(auth::generate_api_key);
    let api_key_hash = api_key.as_deref().map(auth::hash_api_key);
    let interests_json = if interests.is_empty() {
        None
    } else {
        Some(serde_json::to_string(interests)?)
    };

    queries::create_agent(
        pool,
        &id,
        name,
        tagline,
        personality,
        interests_json.as_deref(),
        bio,
        avatar_url,
        api_key_hash.as_deref(),
    )?;

    let row = queries::get_agent(pool, &id)?;
    debug!(agent_id = %id, keyed = api_key.is_some(), "Agent registered");
    Ok(Registration {
        agent: Agent::from_row(row),
        api_key,
    })
}

/// Get an agent by ID.
pub fn get_agent(pool: &DbPool, id: &str) -> MingleResult<Agent> {
    match queries::get_agent(pool, id) {
        Ok(row) => Ok(Agent::from_row(row)),
        Err(DbError::NotFound(_)) => Err(MingleError::AgentNotFound(id.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// List all agents.
pub fn list_agents(pool: &DbPool) -> MingleResult<Vec<Agent>> {
    let rows = queries::list_agents(pool)?;
    Ok(rows.into_iter().map(Agent::from_row).collect())
}

/// Issue a fresh API key for an agent, replacing any previous one.
/// Returns the plaintext key; only its hash is stored.
pub fn rotate_api_key(pool: &DbPool, id: &str) -> MingleResult<String> {
    let key = auth::generate_api_key();
    let hash = auth::hash_api_key(&key);

    match queries::update_api_key_hash(pool, id, &hash) {
        Ok(()) => {
            debug!(agent_id = %id, "API key rotated");
            Ok(key)
        }
        Err(DbError::NotFound(_)) => Err(MingleError::AgentNotFound(id.to_string())),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        mingle_db::migrations::run_migrations(&pool).unwrap();
        pool
    }

    #[test]
    fn test_register_assigns_unique_ids() {
        let pool = test_pool();

        let first = register_agent(&pool, "Ada", None, None, &[], None, None, false).unwrap();
        let second = register_agent(&pool, "Ada", None, None, &[], None, None, false).unwrap();

        assert_ne!(first.agent.id, second.agent.id);
    }

    #[test]
    fn test_register_requires_name() {
        let pool = test_pool();

        let err = register_agent(&pool, "  ", None, None, &[], None, None, false).unwrap_err();
        assert!(matches!(err, MingleError::ValidationError(_)));
    }

    #[test]
    fn test_interests_round_trip() {
        let pool = test_pool();
        let interests = vec!["chess".to_string(), "gardening".to_string()];

        let reg =
            register_agent(&pool, "Ada", None, None, &interests, None, None, false).unwrap();

        let listed = list_agents(&pool).unwrap();
        let agent = listed.iter().find(|a| a.id == reg.agent.id).unwrap();
        assert_eq!(agent.interests, interests);
    }

    #[test]
    fn test_register_without_key_returns_none() {
        let pool = test_pool();

        let reg = register_agent(&pool, "Ada", None, None, &[], None, None, false).unwrap();
        assert!(reg.api_key.is_none());

        let row = queries::get_agent(&pool, &reg.agent.id).unwrap();
        assert!(row.api_key_hash.is_none());
    }

    #[test]
    fn test_rotate_replaces_stored_hash() {
        let pool = test_pool();

        let reg = register_agent(&pool, "Ada", None, None, &[], None, None, true).unwrap();
        let old_key = reg.api_key.unwrap();

        let new_key = rotate_api_key(&pool, &reg.agent.id).unwrap();
        assert_ne!(old_key, new_key);

        let row = queries::get_agent(&pool, &reg.agent.id).unwrap();
        let stored = row.api_key_hash.unwrap();
        assert!(auth::verify_api_key(&new_key, &stored));
        assert!(!auth::verify_api_key(&old_key, &stored));
    }

    #[test]
    fn test_rotate_unknown_agent() {
        let pool = test_pool();

        let err = rotate_api_key(&pool, "missing").unwrap_err();
        assert!(matches!(err, MingleError::AgentNotFound(_)));
    }
}
