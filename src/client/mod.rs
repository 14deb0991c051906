//! Client Module
//!
//! The client library for the warbler service: a reconnecting real-time
//! update consumer, a feed controller with idempotent delta merging and
//! optimistic local mutations, and a thin HTTP wrapper over the feed
//! endpoints.
//!
//! # Module Structure
//!
//! ```text
//! client/
//! ├── mod.rs      - Module exports
//! ├── config.rs   - Server URL and session state
//! ├── error.rs    - Client error types
//! ├── api.rs      - HTTP feed API wrapper
//! ├── consumer.rs - Reconnecting SSE update consumer
//! └── feed.rs     - Feed state and controller
//! ```
//!
//! # Wiring
//!
//! A typical client builds a [`FeedController`], takes its
//! [`UpdateHandlers`] set, and hands it to an [`UpdateConsumer`]:
//!
//! ```rust,no_run
//! use warbler::client::{Config, FeedApi, FeedController, UpdateConsumer};
//!
//! # async fn example() -> Result<(), warbler::client::ClientError> {
//! let config = Config::new();
//! let controller = FeedController::new(FeedApi::new(config.clone()));
//! controller.refresh().await?;
//!
//! let mut consumer = UpdateConsumer::new(config, controller.handlers());
//! consumer.connect();
//! # Ok(())
//! # }
//! ```

/// Server URL and session state
pub mod config;

/// Client error types
pub mod error;

/// HTTP feed API wrapper
pub mod api;

/// Reconnecting SSE update consumer
pub mod consumer;

/// Feed state and controller
pub mod feed;

/// Re-export commonly used types
pub use api::FeedApi;
pub use config::Config;
pub use consumer::{UpdateConsumer, UpdateHandlers, MAX_RECONNECT_ATTEMPTS};
pub use error::ClientError;
pub use feed::{FeedController, FeedState, FEED_PAGE_SIZE};
