//! Centralized error types for Mingle.

use thiserror::Error;

/// Main error type for Mingle operations.
#[derive(Error, Debug)]
pub enum MingleError {
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(#[from] mingle_db::DbError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for Mingle operations.
pub type MingleResult<T> = Result<T, MingleError>;

impl MingleError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create an unauthorized error.
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }
}
