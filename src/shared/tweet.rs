/**
 * Tweet Wire Models
 *
 * This module defines the tweet, like and comment shapes exchanged between
 * the feed endpoints and the client, plus the paginated feed page envelope.
 *
 * # Pagination
 *
 * The feed is cursor-paginated. The cursor is the RFC3339 creation timestamp
 * of the oldest tweet in the previously delivered page; `has_more` is
 * computed server-side by over-fetching one extra row beyond the requested
 * limit.
 */
use crate::shared::event::LikeAction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tweet author as embedded in feed responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TweetAuthor {
    /// Author's user id
    pub id: Uuid,
    /// Unique handle
    pub username: String,
    /// Display name
    pub display_name: String,
}

/// A like association as embedded in feed responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LikeRecord {
    /// Like row id; synthetic records built from realtime deltas use the nil UUID
    pub id: Uuid,
    /// User who placed the like
    pub user_id: Uuid,
}

/// A comment as embedded in feed responses (first page of comments only)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    /// Comment id
    pub id: Uuid,
    /// Comment body
    pub content: String,
    /// Comment author
    pub user: TweetAuthor,
}

/// A tweet with its author, like records and comment preview
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    /// Tweet id
    pub id: Uuid,
    /// Tweet body
    pub content: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Author info
    pub author: TweetAuthor,
    /// All like records for this tweet
    pub likes: Vec<LikeRecord>,
    /// The most recent comments (capped server-side)
    pub comments: Vec<CommentRecord>,
    /// Total like count
    pub likes_count: i64,
    /// Total comment count (may exceed `comments.len()`)
    pub comments_count: i64,
}

impl Tweet {
    /// Whether the given user currently has a like recorded on this tweet
    pub fn liked_by(&self, user_id: Uuid) -> bool {
        self.likes.iter().any(|l| l.user_id == user_id)
    }
}

/// Result of a like toggle on a tweet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    /// The action that was performed
    pub action: LikeAction,
    /// Like count after the toggle
    pub likes_count: i64,
}

/// One page of the cursor-paginated feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    /// Tweets in this page, newest first
    pub tweets: Vec<Tweet>,
    /// Cursor for the next page: the oldest tweet's creation timestamp,
    /// `None` when the page is empty
    pub cursor: Option<String>,
    /// Whether more tweets exist past this page
    pub has_more: bool,
    /// Number of tweets in this page
    pub count: usize,
}

impl FeedPage {
    /// Build a page from rows fetched with an over-fetch of one.
    ///
    /// `rows` must contain at most `limit + 1` tweets, newest first. The
    /// extra row (if present) only signals `has_more` and is not surfaced.
    pub fn from_overfetched(mut rows: Vec<Tweet>, limit: usize) -> Self {
        let has_more = rows.len() > limit;
        rows.truncate(limit);
        let cursor = rows.last().map(|t| t.created_at.to_rfc3339());
        let count = rows.len();
        Self {
            tweets: rows,
            cursor,
            has_more,
            count,
        }
    }
}
