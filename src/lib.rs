//! Warbler - Main Library
//!
//! Warbler is a small social-feed service (tweets, likes, comments,
//! profiles) with a pseudo-real-time update channel, built on Axum,
//! PostgreSQL (sqlx) and reqwest.
//!
//! # Module Structure
//!
//! The library is organized into three main modules:
//!
//! - **`shared`** - Types shared between server and client
//!   - The `UpdateEvent` envelope streamed over the realtime channel
//!   - Tweet, like, comment and feed-page wire models
//!   - Shared error types
//!
//! - **`backend`** - Server-side code (only compiled with the `ssr` feature)
//!   - Axum HTTP server with JWT authentication
//!   - Cursor-paginated tweet feed endpoints
//!   - The Update Publisher: a per-connection SSE stream that polls the
//!     store for recent likes/comments and pushes delta events
//!
//! - **`client`** - Client library
//!   - The Update Consumer: a reconnecting SSE client with exponential
//!     backoff and a handler-set dispatch model
//!   - The Feed Controller: in-memory feed state with idempotent delta
//!     merging, cursor pagination and optimistic local mutations
//!
//! # Feature Flags
//!
//! - **`ssr`** - enables the backend modules and the `warbler-server`
//!   binary. The shared and client modules compile without it.
//!
//! # Real-time Channel
//!
//! The realtime subsystem is a poll-and-push design: the publisher polls
//! the store every 2 seconds with a 5-second lookback window (wider than
//! the tick, so jitter cannot open gaps) and streams `likes` / `comments`
//! delta events over SSE. Duplicate delivery across overlapping windows is
//! possible by construction, so the consumer side merges every delta
//! idempotently.
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations, propagated with `?`
//! - Custom error types in `shared::error`, `backend::error` and
//!   `client::error`

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// Client library
pub mod client;
