/**
 * Backend Error Types
 *
 * This module defines the error taxonomy for HTTP handlers:
 *
 * - Validation errors (bad input, duplicates) -> 400
 * - Authentication failures (bad credentials, invalid token) -> 401
 * - Missing records -> 404
 * - Unconfigured external dependency (database, AI key, billing key) -> 503
 * - Database and other internal failures -> 500
 */
use axum::http::StatusCode;
use thiserror::Error;

/// Backend-specific error type
///
/// Each variant maps to one HTTP status class; handlers propagate these
/// with `?` and the `IntoResponse` impl in `conversion.rs` renders them.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request input (missing fields, duplicates, illegal transitions)
    #[error("{0}")]
    Validation(String),

    /// Authentication failure (bad credentials, invalid or expired token)
    #[error("{0}")]
    Unauthorized(String),

    /// A referenced record does not exist
    #[error("{0}")]
    NotFound(String),

    /// An external dependency is not configured or not reachable
    #[error("{0}")]
    ServiceUnavailable(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unexpected internal failure
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Shorthand for the 503 raised when no database pool is configured
    pub fn database_unavailable() -> Self {
        Self::ServiceUnavailable("Database not configured".to_string())
    }
}
