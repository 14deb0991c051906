//! Client Error Types
//!
//! Errors produced by the client library: HTTP transport failures,
//! unexpected server responses, and missing-session failures.
use thiserror::Error;

/// Client-side error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// No session is installed but the operation requires one
    #[error("Not authenticated")]
    NotAuthenticated,

    /// HTTP transport or status error
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
