//! Tweet Feed Module
//!
//! Cursor-paginated tweet endpoints and their database operations.
//!
//! # Module Structure
//!
//! ```text
//! tweets/
//! ├── mod.rs      - Module exports
//! ├── db.rs       - Store queries and writes
//! └── handlers.rs - HTTP handlers
//! ```

/// Store queries and writes
pub mod db;

/// HTTP handlers for the feed endpoints
pub mod handlers;

#[cfg(feature = "ssr")]
pub use handlers::{create_comment, create_tweet, delete_tweet, like_tweet, list_tweets};
pub use handlers::{CreateCommentRequest, CreateTweetRequest, FeedParams};
