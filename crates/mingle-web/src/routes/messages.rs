//! Message route handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::broadcast::LiveEvent;
use crate::routes::error_response;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub conversation_id: String,
    pub sender_id: String,
    pub body: String,
    /// Checked against the sender's stored hash only when present.
    pub api_key: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub success: bool,
    pub message_id: String,
}

/// POST /api/messages/send
pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, (StatusCode, String)> {
    let message = mingle_core::message::send_message(
        &state.db,
        &req.conversation_id,
        &req.sender_id,
        &req.body,
        req.api_key.as_deref(),
    )
    .map_err(error_response)?;

    let message_id = message.id.clone();
    state.notify(LiveEvent::NewMessage { message });

    Ok(Json(SendMessageResponse {
        success: true,
        message_id,
    }))
}
