/**
 * Time-Windowed Store Queries
 *
 * This module implements the read-only queries the Update Publisher runs on
 * every poll tick: likes and comments created since a given instant, joined
 * with the users table for the denormalized username, bounded to
 * [`MAX_ROWS_PER_POLL`] rows each.
 *
 * The publisher never writes through this path; the store is externally
 * synchronized and these queries need no locking discipline.
 */
use crate::shared::{CommentDelta, LikeAction, LikeDelta};
use chrono::{DateTime, Utc};
#[cfg(feature = "ssr")]
use sqlx::PgPool;
use uuid::Uuid;

/// Upper bound on rows returned per poll tick, per entity kind
pub const MAX_ROWS_PER_POLL: i64 = 10;

/// A like row as selected by the window query
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LikeRow {
    pub tweet_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
}

impl From<LikeRow> for LikeDelta {
    fn from(row: LikeRow) -> Self {
        // Unlikes delete the row and are not observable through this query,
        // so everything surfaced here is an added like.
        LikeDelta {
            tweet_id: row.tweet_id,
            user_id: row.user_id,
            username: row.username,
            action: LikeAction::Like,
        }
    }
}

/// A comment row as selected by the window query
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    pub comment_id: Uuid,
    pub tweet_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub content: String,
}

impl From<CommentRow> for CommentDelta {
    fn from(row: CommentRow) -> Self {
        CommentDelta {
            tweet_id: row.tweet_id,
            user_id: row.user_id,
            username: row.username,
            comment_id: row.comment_id,
            content: row.content,
        }
    }
}

/// Likes created at or after `since`, oldest first, capped at
/// [`MAX_ROWS_PER_POLL`]
#[cfg(feature = "ssr")]
pub async fn find_likes_since(
    pool: &PgPool,
    since: DateTime<Utc>,
) -> Result<Vec<LikeRow>, sqlx::Error> {
    sqlx::query_as::<_, LikeRow>(
        r#"
        SELECT l.tweet_id, l.user_id, u.username
        FROM likes l
        JOIN users u ON u.id = l.user_id
        WHERE l.created_at >= $1
        ORDER BY l.created_at ASC
        LIMIT $2
        "#,
    )
    .bind(since)
    .bind(MAX_ROWS_PER_POLL)
    .fetch_all(pool)
    .await
}

/// Comments created at or after `since`, oldest first, capped at
/// [`MAX_ROWS_PER_POLL`]
#[cfg(feature = "ssr")]
pub async fn find_comments_since(
    pool: &PgPool,
    since: DateTime<Utc>,
) -> Result<Vec<CommentRow>, sqlx::Error> {
    sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT c.id AS comment_id, c.tweet_id, c.user_id, u.username, c.content
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.created_at >= $1
        ORDER BY c.created_at ASC
        LIMIT $2
        "#,
    )
    .bind(since)
    .bind(MAX_ROWS_PER_POLL)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_row_maps_to_like_action() {
        let row = LikeRow {
            tweet_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            username: "alice".to_string(),
        };
        let delta: LikeDelta = row.clone().into();
        assert_eq!(delta.action, LikeAction::Like);
        assert_eq!(delta.tweet_id, row.tweet_id);
        assert_eq!(delta.username, "alice");
    }

    #[test]
    fn test_comment_row_maps_fields() {
        let row = CommentRow {
            comment_id: Uuid::new_v4(),
            tweet_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            username: "bob".to_string(),
            content: "hi".to_string(),
        };
        let delta: CommentDelta = row.clone().into();
        assert_eq!(delta.comment_id, row.comment_id);
        assert_eq!(delta.content, "hi");
    }
}
