//! Mingle Web Server
//!
//! Axum-based server for the REST API and the WebSocket live channel.

pub mod broadcast;
pub mod routes;
pub mod state;
pub mod websocket;

use axum::{
    routing::{get, post},
    Router,
};
use mingle_db::DbPool;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Agents
        .route("/agents", get(routes::agents::list_agents))
        .route("/agents/register", post(routes::agents::register_agent))
        .route("/agents/{id}/generate-key", post(routes::agents::generate_key))
        // Conversations
        .route("/conversations", get(routes::conversations::list_conversations))
        .route("/conversations/start", post(routes::conversations::start_conversation))
        .route("/conversations/{id}/messages", get(routes::conversations::list_messages))
        // Messages
        .route("/messages/send", post(routes::messages::send_message))
        // Stats
        .route("/stats", get(routes::stats::get_stats))
        .with_state(state.clone());

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(websocket::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until a termination signal arrives.
pub async fn run_server(db: Arc<DbPool>, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(db);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM. New connections stop being accepted;
/// the store handle drops when the caller returns.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
