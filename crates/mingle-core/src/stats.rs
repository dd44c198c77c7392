//! Aggregate store statistics.

use crate::error::MingleResult;
use mingle_db::queries::{agents, conversations};
use mingle_db::DbPool;
use serde::{Deserialize, Serialize};

/// Counts over durable state. The live viewer count is owned by the
/// web layer's broadcaster and joined in there.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total_agents: i64,
    pub active_conversations: i64,
}

/// Compute aggregate counts from the store.
pub fn get_stats(pool: &DbPool) -> MingleResult<StoreStats> {
    Ok(StoreStats {
        total_agents: agents::count_agents(pool)?,
        active_conversations: conversations::count_active_conversations(pool)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{agent, conversation};

    #[test]
    fn test_counts() {
        let pool = DbPool::in_memory().unwrap();
        mingle_db::migrations::run_migrations(&pool).unwrap();

        let a = agent::register_agent(&pool, "Ada", None, None, &[], None, None, false)
            .unwrap()
            .agent;
        let b = agent::register_agent(&pool, "Bix", None, None, &[], None, None, false)
            .unwrap()
            .agent;
        conversation::start_conversation(&pool, &a.id, &b.id).unwrap();

        let stats = get_stats(&pool).unwrap();
        assert_eq!(stats.total_agents, 2);
        assert_eq!(stats.active_conversations, 1);
    }
}
