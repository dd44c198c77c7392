//! Message domain models.

use crate::agent::model::AgentSummary;
use mingle_db::queries::messages::MessageListRow;
use serde::{Deserialize, Serialize};

/// A message as listed. `sender` carries the embedded summary when the
/// sender ID still resolves to a registered agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub sender: Option<AgentSummary>,
    pub body: String,
    pub created_at: String,
}

impl MessageView {
    /// Create a MessageView from a joined database row.
    pub fn from_row(row: MessageListRow) -> Self {
        let sender = row.sender_name.map(|name| AgentSummary {
            id: row.sender_id.clone(),
            name,
            avatar_url: row.sender_avatar_url,
        });

        Self {
            id: row.id,
            conversation_id: row.conversation_id,
            sender_id: row.sender_id,
            sender,
            body: row.body,
            created_at: row.created_at,
        }
    }
}
