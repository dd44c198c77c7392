//! REST route handlers.

pub mod agents;
pub mod conversations;
pub mod messages;
pub mod stats;

use axum::http::StatusCode;
use mingle_core::MingleError;

/// Map a core error to the `(status, message)` response handlers return.
pub(crate) fn error_response(err: MingleError) -> (StatusCode, String) {
    let status = match &err {
        MingleError::ValidationError(_) => StatusCode::BAD_REQUEST,
        MingleError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        MingleError::AgentNotFound(_) | MingleError::ConversationNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        MingleError::Database(_) | MingleError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}
