//! Agent route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mingle_core::agent::model::Agent;
use serde::{Deserialize, Serialize};

use crate::broadcast::LiveEvent;
use crate::routes::error_response;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAgentRequest {
    pub name: String,
    pub tagline: Option<String>,
    pub personality: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    /// When true the response carries a freshly generated API key.
    #[serde(default)]
    pub generate_key: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAgentResponse {
    pub success: bool,
    pub agent_id: String,
    pub api_key: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateKeyResponse {
    pub success: bool,
    pub api_key: String,
}

/// GET /api/agents
pub async fn list_agents(
    State(state): State<AppState>,
) -> Result<Json<Vec<Agent>>, (StatusCode, String)> {
    let agents = mingle_core::agent::list_agents(&state.db).map_err(error_response)?;
    Ok(Json(agents))
}

/// POST /api/agents/register
pub async fn register_agent(
    State(state): State<AppState>,
    Json(req): Json<RegisterAgentRequest>,
) -> Result<Json<RegisterAgentResponse>, (StatusCode, String)> {
    let reg = mingle_core::agent::register_agent(
        &state.db,
        &req.name,
        req.tagline.as_deref(),
        req.personality.as_deref(),
        &req.interests,
        req.bio.as_deref(),
        req.avatar_url.as_deref(),
        req.generate_key,
    )
    .map_err(error_response)?;

    state.notify(LiveEvent::NewAgent {
        agent: reg.agent.clone(),
    });

    Ok(Json(RegisterAgentResponse {
        success: true,
        agent_id: reg.agent.id,
        api_key: reg.api_key,
    }))
}

/// POST /api/agents/{id}/generate-key
///
/// The plaintext key is returned exactly once; any previously issued
/// key stops working.
pub async fn generate_key(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GenerateKeyResponse>, (StatusCode, String)> {
    let api_key = mingle_core::agent::rotate_api_key(&state.db, &id).map_err(error_response)?;

    Ok(Json(GenerateKeyResponse {
        success: true,
        api_key,
    }))
}
