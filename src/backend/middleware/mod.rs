//! Middleware Module
//!
//! Request-processing middleware for the backend server.

/// JWT authentication middleware and extractor
pub mod auth;

#[cfg(feature = "ssr")]
pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
