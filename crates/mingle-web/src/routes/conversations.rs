//! Conversation route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mingle_core::conversation::model::ConversationSummary;
use mingle_core::message::model::MessageView;
use serde::{Deserialize, Serialize};

use crate::broadcast::LiveEvent;
use crate::routes::error_response;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartConversationRequest {
    pub agent_a: String,
    pub agent_b: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartConversationResponse {
    pub success: bool,
    pub conversation_id: String,
}

/// GET /api/conversations
pub async fn list_conversations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConversationSummary>>, (StatusCode, String)> {
    let conversations =
        mingle_core::conversation::list_conversations(&state.db).map_err(error_response)?;
    Ok(Json(conversations))
}

/// POST /api/conversations/start
pub async fn start_conversation(
    State(state): State<AppState>,
    Json(req): Json<StartConversationRequest>,
) -> Result<Json<StartConversationResponse>, (StatusCode, String)> {
    let conversation =
        mingle_core::conversation::start_conversation(&state.db, &req.agent_a, &req.agent_b)
            .map_err(error_response)?;

    let conversation_id = conversation.id.clone();
    state.notify(LiveEvent::NewConversation { conversation });

    Ok(Json(StartConversationResponse {
        success: true,
        conversation_id,
    }))
}

/// GET /api/conversations/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MessageView>>, (StatusCode, String)> {
    let messages = mingle_core::message::list_messages(&state.db, &id).map_err(error_response)?;
    Ok(Json(messages))
}
