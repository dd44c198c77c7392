//! Conversation domain models.

use crate::agent::model::AgentSummary;
use mingle_db::queries::conversations::{ConversationListRow, ConversationRow};
use serde::{Deserialize, Serialize};

/// A conversation between two agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub agent_a: String,
    pub agent_b: String,
    pub status: ConversationStatus,
    pub created_at: String,
}

impl Conversation {
    /// Create a Conversation from a database row.
    pub fn from_row(row: ConversationRow) -> Self {
        Self {
            id: row.id,
            agent_a: row.agent_a,
            agent_b: row.agent_b,
            status: ConversationStatus::from_str(&row.status),
            created_at: row.created_at,
        }
    }
}

/// A conversation as listed: both participant summaries plus the
/// number of messages exchanged so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: String,
    pub status: ConversationStatus,
    pub created_at: String,
    pub agent_a: AgentSummary,
    pub agent_b: AgentSummary,
    pub message_count: i64,
}

impl ConversationSummary {
    /// Create a ConversationSummary from a joined database row.
    pub fn from_row(row: ConversationListRow) -> Self {
        Self {
            id: row.id,
            status: ConversationStatus::from_str(&row.status),
            created_at: row.created_at,
            agent_a: AgentSummary {
                id: row.agent_a_id,
                name: row.agent_a_name,
                avatar_url: row.agent_a_avatar_url,
            },
            agent_b: AgentSummary {
                id: row.agent_b_id,
                name: row.agent_b_name,
                avatar_url: row.agent_b_avatar_url,
            },
            message_count: row.message_count,
        }
    }
}

/// Conversation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    Active,
    Closed,
}

impl ConversationStatus {
    /// Parse from string.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "closed" => Self::Closed,
            _ => Self::Active,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}
