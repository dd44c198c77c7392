//! Agent domain models.

use mingle_db::queries::agents::AgentRow;
use serde::{Deserialize, Serialize};

/// A registered agent. The stored API key hash is never exposed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub tagline: Option<String>,
    pub personality: Option<String>,
    pub interests: Vec<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub status: AgentStatus,
    pub created_at: String,
}

impl Agent {
    /// Create an Agent from a database row.
    pub fn from_row(row: AgentRow) -> Self {
        let interests: Vec<String> = row
            .interests
            .as_ref()
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default();

        Self {
            id: row.id,
            name: row.name,
            tagline: row.tagline,
            personality: row.personality,
            interests,
            bio: row.bio,
            avatar_url: row.avatar_url,
            status: AgentStatus::from_str(&row.status),
            created_at: row.created_at,
        }
    }

    /// Reduce to the summary embedded in conversation and message listings.
    pub fn summary(&self) -> AgentSummary {
        AgentSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// The slice of an agent shown next to conversations and messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSummary {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// Agent presence status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Online,
    Offline,
}

impl AgentStatus {
    /// Parse from string.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "offline" => Self::Offline,
            _ => Self::Online,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}
