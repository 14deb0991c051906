//! Backend Module
//!
//! This module contains all server-side code for the warbler application.
//! It provides an Axum HTTP server with JWT authentication, a cursor-
//! paginated tweet feed, and a Server-Sent-Events real-time update stream.
//!
//! This module is only compiled when the `ssr` feature is enabled. All
//! code in this module runs on the server and handles HTTP requests.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Authentication, JWT tokens, user management, profiles
//! - **`tweets`** - Feed endpoints and their database operations
//! - **`realtime`** - The Update Publisher (SSE poll-and-push stream)
//! - **`middleware`** - Request authentication
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication and profiles
//! ├── tweets/         - Feed endpoints
//! ├── realtime/       - Real-time update publisher
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Concurrency Model
//!
//! Request handlers share only the database pool (internally
//! synchronized); there is no other cross-request mutable state. Each
//! real-time subscription owns an independent interval timer inside its
//! response stream, so one slow connection cannot stall another, and a
//! client disconnect drops the stream together with its timer.
//!
//! # Error Handling
//!
//! The backend uses standard HTTP status codes and custom error types:
//! - `ApiError` for handler errors (converted to JSON responses)
//! - `StatusCode` for auth handlers
//! - Proper error propagation with the `?` operator

/// Server setup and configuration
#[cfg(feature = "ssr")]
pub mod server;

/// Route configuration
#[cfg(feature = "ssr")]
pub mod routes;

/// Tweet feed endpoints
#[cfg(feature = "ssr")]
pub mod tweets;

/// Real-time update publisher
#[cfg(feature = "ssr")]
pub mod realtime;

/// Backend error types
#[cfg(feature = "ssr")]
pub mod error;

/// Authentication and user management
#[cfg(feature = "ssr")]
pub mod auth;

/// Middleware for request processing
#[cfg(feature = "ssr")]
pub mod middleware;

/// Re-export commonly used types
#[cfg(feature = "ssr")]
pub use error::ApiError;
#[cfg(feature = "ssr")]
pub use realtime::handle_realtime_subscription;
#[cfg(feature = "ssr")]
pub use server::create_app;
