/**
 * Real-time Update Events
 *
 * This module defines the event envelope streamed from the Update Publisher
 * to connected clients. Every frame on the wire is a JSON object with a
 * mandatory `type` discriminator and a kind-specific payload.
 *
 * # Event Kinds
 *
 * - `connected` - emitted once when the stream opens, carries a server timestamp
 * - `likes` - a batch of like deltas observed in the last poll window
 * - `comments` - a batch of comment deltas observed in the last poll window
 * - `new_tweet` - a freshly created tweet notification
 * - `error` - a non-fatal publisher-side failure (polling continues)
 *
 * # Delivery Semantics
 *
 * The publisher's poll window (5s) is wider than its tick interval (2s), so
 * the same delta can be delivered twice across consecutive ticks. Consumers
 * must apply like/comment deltas as idempotent upserts, never as
 * unconditional appends.
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The action carried by a like delta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    /// A like was added
    Like,
    /// A like was removed
    Unlike,
}

/// A single like change on a tweet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LikeDelta {
    /// Tweet the like belongs to
    pub tweet_id: Uuid,
    /// User who liked (or unliked)
    pub user_id: Uuid,
    /// Denormalized username for display
    pub username: String,
    /// Whether the like was added or removed
    pub action: LikeAction,
}

/// A single new comment on a tweet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentDelta {
    /// Tweet the comment belongs to
    pub tweet_id: Uuid,
    /// Comment author
    pub user_id: Uuid,
    /// Denormalized username for display
    pub username: String,
    /// Identifier of the created comment
    pub comment_id: Uuid,
    /// Comment body
    pub content: String,
}

/// Notification that a new tweet was created
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTweetDelta {
    /// Tweet identifier
    pub id: Uuid,
    /// Tweet body
    pub content: String,
    /// Tweet author
    pub user_id: Uuid,
    /// Creation timestamp (RFC3339)
    pub created_at: String,
}

/// A real-time update event as streamed over the subscription
///
/// This is a closed variant type: the dispatch in the Update Consumer is
/// exhaustive over these kinds, so adding a kind is a compile-time change on
/// both ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdateEvent {
    /// Stream opened; carries the server timestamp (RFC3339)
    Connected { timestamp: String },
    /// Like deltas from one poll tick, in store order
    Likes { data: Vec<LikeDelta> },
    /// Comment deltas from one poll tick, in store order
    Comments { data: Vec<CommentDelta> },
    /// A newly created tweet
    NewTweet { data: NewTweetDelta },
    /// A non-fatal publisher failure; the stream stays open
    Error { message: String },
}

impl UpdateEvent {
    /// Create a `connected` event with the given server timestamp
    pub fn connected(timestamp: impl Into<String>) -> Self {
        Self::Connected {
            timestamp: timestamp.into(),
        }
    }

    /// Create a `likes` event
    pub fn likes(data: Vec<LikeDelta>) -> Self {
        Self::Likes { data }
    }

    /// Create a `comments` event
    pub fn comments(data: Vec<CommentDelta>) -> Self {
        Self::Comments { data }
    }

    /// Create an `error` event
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// The wire name of this event's kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::Likes { .. } => "likes",
            Self::Comments { .. } => "comments",
            Self::NewTweet { .. } => "new_tweet",
            Self::Error { .. } => "error",
        }
    }
}
