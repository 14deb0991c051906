/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP
 * responses.
 *
 * # Error Categories
 *
 * - `HandlerError` - request-level failures with an explicit status code
 *   (missing resources, validation failures, authorization failures)
 * - `DatabaseError` - sqlx failures from the data store
 * - `SharedError` - errors bubbled up from the shared module
 * - `SerializationError` - JSON serialization failures
 */
use crate::shared::SharedError;
use axum::http::StatusCode;
use thiserror::Error;

/// Backend-specific error types
///
/// Each variant maps to an HTTP status code via [`ApiError::status_code`],
/// and the whole enum implements `IntoResponse` (see `conversion.rs`) so
/// handlers can return it directly.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Handler error with an explicit status code
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Data store error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Shared error (from the shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ApiError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// 403 Forbidden
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// 503 Service Unavailable (database not configured)
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - uses the status code from the error
    /// - `DatabaseError` - 404 for missing rows, 500 otherwise
    /// - `SharedError` - 400 for validation, 500 otherwise
    /// - `SerializationError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::DatabaseError(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::EventError { .. } => StatusCode::BAD_REQUEST,
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::DatabaseError(sqlx::Error::RowNotFound) => "Not found".to_string(),
            // Internal details are not leaked to clients
            Self::DatabaseError(_) => "Internal server error".to_string(),
            Self::SharedError(err) => err.to_string(),
            Self::SerializationError(_) => "Internal server error".to_string(),
        }
    }
}
