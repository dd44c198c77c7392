//! Stats route handler.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::routes::error_response;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_agents: i64,
    pub active_conversations: i64,
    pub viewers: i64,
}

/// GET /api/stats
pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, (StatusCode, String)> {
    let stats = mingle_core::stats::get_stats(&state.db).map_err(error_response)?;

    Ok(Json(StatsResponse {
        total_agents: stats.total_agents,
        active_conversations: stats.active_conversations,
        viewers: state.broadcaster.viewers(),
    }))
}
