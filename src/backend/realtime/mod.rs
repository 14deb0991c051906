//! Real-time Update Delivery
//!
//! This module implements the server half of the real-time subsystem: a
//! per-connection Server-Sent Events stream that polls the store for recent
//! likes and comments and pushes [`crate::shared::UpdateEvent`] frames.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs        - Module exports and documentation
//! ├── publisher.rs  - SSE handler and poll loop
//! └── queries.rs    - Time-windowed store queries
//! ```
//!
//! # Design
//!
//! Polling with a lookback window wider than the tick interval guarantees
//! at-least-once delivery of recent changes without requiring the store to
//! support change notification. Duplicate delivery across overlapping
//! windows is possible by construction; the client merges deltas
//! idempotently.

/// SSE subscription handler and poll loop
pub mod publisher;

/// Time-windowed like/comment queries
pub mod queries;

#[cfg(feature = "ssr")]
pub use publisher::handle_realtime_subscription;
pub use publisher::{tick_events, window_start, LOOKBACK_WINDOW_SECS, POLL_INTERVAL_SECS};
pub use queries::MAX_ROWS_PER_POLL;
