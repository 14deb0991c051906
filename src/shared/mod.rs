//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the server and the client library. All types here are designed for
//! serialization and transmission over HTTP.
//!
//! # Overview
//!
//! - The `UpdateEvent` envelope and its delta payloads are the contract of
//!   the real-time subscription stream.
//! - The tweet/feed models mirror the JSON shapes of the feed endpoints.
//! - Shared errors cover failures that are meaningful on either side.

/// Tweet, like, comment and feed-page wire models
pub mod tweet;

/// Real-time update event envelope
pub mod event;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use event::{CommentDelta, LikeAction, LikeDelta, NewTweetDelta, UpdateEvent};
pub use tweet::{CommentRecord, FeedPage, LikeRecord, LikeToggle, Tweet, TweetAuthor};
