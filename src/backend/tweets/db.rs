/**
 * Tweet Database Operations
 *
 * This module implements the store access for the feed endpoints: cursor-
 * paginated tweet fetches with their authors, like records and comment
 * previews, plus the write paths (create, delete, like toggle, comment).
 *
 * # Query Shape
 *
 * A feed page is assembled from three queries: the tweet rows themselves
 * (joined with users for the author), then the like and comment rows for
 * exactly the fetched tweet ids. The comment preview is capped at
 * [`COMMENT_PREVIEW_LIMIT`] per tweet after fetching, so the comment count
 * can still reflect the true total.
 */
use crate::shared::{CommentRecord, FeedPage, LikeAction, LikeRecord, Tweet, TweetAuthor};
use chrono::{DateTime, Utc};
#[cfg(feature = "ssr")]
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// Default page size when the request does not specify one
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Hard upper bound on the page size
pub const MAX_PAGE_LIMIT: usize = 50;

/// How many comments are embedded per tweet in feed responses
pub const COMMENT_PREVIEW_LIMIT: usize = 5;

/// Feed ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    /// Newest first (default)
    Recent,
    /// Page re-ranked by like count
    Popular,
}

impl SortBy {
    /// Parse the `sortBy` query parameter; unknown values fall back to recent
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("popular") => Self::Popular,
            _ => Self::Recent,
        }
    }
}

/// Time filter applied to a feed fetch
#[derive(Debug, Clone, Copy)]
pub enum FeedFilter {
    /// No filter: the newest tweets
    None,
    /// Tweets strictly older than the cursor (pagination)
    Before(DateTime<Utc>),
    /// Tweets strictly newer than the timestamp (new-item check)
    Since(DateTime<Utc>),
}

/// Clamp a requested page size to `1..=MAX_PAGE_LIMIT`
pub fn clamp_limit(requested: Option<u32>) -> usize {
    (requested.map(|l| l as usize).unwrap_or(DEFAULT_PAGE_LIMIT)).clamp(1, MAX_PAGE_LIMIT)
}

/// A tweet row joined with its author
#[cfg(feature = "ssr")]
#[derive(Debug, Clone, sqlx::FromRow)]
struct TweetRow {
    id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    author_id: Uuid,
    author_username: String,
    author_display_name: String,
}

/// A like row scoped to a set of tweets
#[cfg(feature = "ssr")]
#[derive(Debug, Clone, sqlx::FromRow)]
struct LikeForTweetRow {
    id: Uuid,
    tweet_id: Uuid,
    user_id: Uuid,
}

/// A comment row joined with its author, scoped to a set of tweets
#[cfg(feature = "ssr")]
#[derive(Debug, Clone, sqlx::FromRow)]
struct CommentForTweetRow {
    id: Uuid,
    tweet_id: Uuid,
    content: String,
    user_id: Uuid,
    username: String,
    display_name: String,
}

/// Group like rows by tweet id, preserving row order
fn group_likes(rows: Vec<(Uuid, LikeRecord)>) -> HashMap<Uuid, Vec<LikeRecord>> {
    let mut grouped: HashMap<Uuid, Vec<LikeRecord>> = HashMap::new();
    for (tweet_id, record) in rows {
        grouped.entry(tweet_id).or_default().push(record);
    }
    grouped
}

/// Group comment rows by tweet id, keeping the total count but truncating
/// the embedded records to [`COMMENT_PREVIEW_LIMIT`]
fn group_comments(
    rows: Vec<(Uuid, CommentRecord)>,
) -> HashMap<Uuid, (Vec<CommentRecord>, i64)> {
    let mut grouped: HashMap<Uuid, (Vec<CommentRecord>, i64)> = HashMap::new();
    for (tweet_id, record) in rows {
        let entry = grouped.entry(tweet_id).or_default();
        entry.1 += 1;
        if entry.0.len() < COMMENT_PREVIEW_LIMIT {
            entry.0.push(record);
        }
    }
    grouped
}

/// Fetch tweet rows matching the filter, newest first
#[cfg(feature = "ssr")]
async fn fetch_tweet_rows(
    pool: &PgPool,
    filter: FeedFilter,
    fetch: i64,
) -> Result<Vec<TweetRow>, sqlx::Error> {
    const BASE: &str = r#"
        SELECT t.id, t.content, t.created_at,
               u.id AS author_id, u.username AS author_username,
               u.display_name AS author_display_name
        FROM tweets t
        JOIN users u ON u.id = t.author_id
    "#;

    match filter {
        FeedFilter::None => {
            sqlx::query_as::<_, TweetRow>(&format!(
                "{BASE} ORDER BY t.created_at DESC LIMIT $1"
            ))
            .bind(fetch)
            .fetch_all(pool)
            .await
        }
        FeedFilter::Before(cursor) => {
            sqlx::query_as::<_, TweetRow>(&format!(
                "{BASE} WHERE t.created_at < $1 ORDER BY t.created_at DESC LIMIT $2"
            ))
            .bind(cursor)
            .bind(fetch)
            .fetch_all(pool)
            .await
        }
        FeedFilter::Since(since) => {
            sqlx::query_as::<_, TweetRow>(&format!(
                "{BASE} WHERE t.created_at > $1 ORDER BY t.created_at DESC LIMIT $2"
            ))
            .bind(since)
            .bind(fetch)
            .fetch_all(pool)
            .await
        }
    }
}

/// Assemble full [`Tweet`] values for the given rows
#[cfg(feature = "ssr")]
async fn assemble_tweets(pool: &PgPool, rows: Vec<TweetRow>) -> Result<Vec<Tweet>, sqlx::Error> {
    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

    let like_rows = sqlx::query_as::<_, LikeForTweetRow>(
        r#"
        SELECT id, tweet_id, user_id
        FROM likes
        WHERE tweet_id = ANY($1)
        ORDER BY created_at ASC
        "#,
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let comment_rows = sqlx::query_as::<_, CommentForTweetRow>(
        r#"
        SELECT c.id, c.tweet_id, c.content,
               u.id AS user_id, u.username, u.display_name
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.tweet_id = ANY($1)
        ORDER BY c.created_at DESC
        "#,
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut likes = group_likes(
        like_rows
            .into_iter()
            .map(|r| {
                (
                    r.tweet_id,
                    LikeRecord {
                        id: r.id,
                        user_id: r.user_id,
                    },
                )
            })
            .collect(),
    );
    let mut comments = group_comments(
        comment_rows
            .into_iter()
            .map(|r| {
                (
                    r.tweet_id,
                    CommentRecord {
                        id: r.id,
                        content: r.content,
                        user: TweetAuthor {
                            id: r.user_id,
                            username: r.username,
                            display_name: r.display_name,
                        },
                    },
                )
            })
            .collect(),
    );

    Ok(rows
        .into_iter()
        .map(|row| {
            let tweet_likes = likes.remove(&row.id).unwrap_or_default();
            let (tweet_comments, comments_count) =
                comments.remove(&row.id).unwrap_or((Vec::new(), 0));
            let likes_count = tweet_likes.len() as i64;
            Tweet {
                id: row.id,
                content: row.content,
                created_at: row.created_at,
                author: TweetAuthor {
                    id: row.author_id,
                    username: row.author_username,
                    display_name: row.author_display_name,
                },
                likes: tweet_likes,
                comments: tweet_comments,
                likes_count,
                comments_count,
            }
        })
        .collect())
}

/// Load one feed page.
///
/// Over-fetches one row past `limit` so the page can report `has_more`
/// without a second query. With `SortBy::Popular`, the surfaced page is
/// re-ranked by like count after the cursor has been fixed on the
/// time-ordered rows, so pagination stays consistent.
#[cfg(feature = "ssr")]
pub async fn load_feed_page(
    pool: &PgPool,
    filter: FeedFilter,
    limit: usize,
    sort_by: SortBy,
) -> Result<FeedPage, sqlx::Error> {
    let rows = fetch_tweet_rows(pool, filter, (limit + 1) as i64).await?;
    let tweets = assemble_tweets(pool, rows).await?;

    let mut page = FeedPage::from_overfetched(tweets, limit);
    if sort_by == SortBy::Popular {
        page.tweets.sort_by(|a, b| b.likes_count.cmp(&a.likes_count));
    }
    Ok(page)
}

/// All tweets by one author, newest first (profile view)
#[cfg(feature = "ssr")]
pub async fn tweets_by_author(pool: &PgPool, author_id: Uuid) -> Result<Vec<Tweet>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TweetRow>(
        r#"
        SELECT t.id, t.content, t.created_at,
               u.id AS author_id, u.username AS author_username,
               u.display_name AS author_display_name
        FROM tweets t
        JOIN users u ON u.id = t.author_id
        WHERE t.author_id = $1
        ORDER BY t.created_at DESC
        "#,
    )
    .bind(author_id)
    .fetch_all(pool)
    .await?;

    assemble_tweets(pool, rows).await
}

/// Insert a new tweet and return it with empty associations
#[cfg(feature = "ssr")]
pub async fn insert_tweet(
    pool: &PgPool,
    author_id: Uuid,
    content: String,
) -> Result<Tweet, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query("INSERT INTO tweets (id, author_id, content, created_at) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(author_id)
        .bind(&content)
        .bind(now)
        .execute(pool)
        .await?;

    let author = sqlx::query_as::<_, (String, String)>(
        "SELECT username, display_name FROM users WHERE id = $1",
    )
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    Ok(Tweet {
        id,
        content,
        created_at: now,
        author: TweetAuthor {
            id: author_id,
            username: author.0,
            display_name: author.1,
        },
        likes: Vec::new(),
        comments: Vec::new(),
        likes_count: 0,
        comments_count: 0,
    })
}

/// The author of a tweet, or `None` if the tweet does not exist
#[cfg(feature = "ssr")]
pub async fn tweet_author(pool: &PgPool, tweet_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT author_id FROM tweets WHERE id = $1")
        .bind(tweet_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|r| r.0))
}

/// Delete a tweet; likes and comments cascade
#[cfg(feature = "ssr")]
pub async fn delete_tweet(pool: &PgPool, tweet_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM tweets WHERE id = $1")
        .bind(tweet_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Toggle the caller's like on a tweet.
///
/// Returns the action that was performed and the resulting like count. The
/// (tweet, user) uniqueness is enforced by the store's unique constraint.
#[cfg(feature = "ssr")]
pub async fn toggle_like(
    pool: &PgPool,
    tweet_id: Uuid,
    user_id: Uuid,
) -> Result<(LikeAction, i64), sqlx::Error> {
    let deleted = sqlx::query("DELETE FROM likes WHERE tweet_id = $1 AND user_id = $2")
        .bind(tweet_id)
        .bind(user_id)
        .execute(pool)
        .await?
        .rows_affected();

    let action = if deleted > 0 {
        LikeAction::Unlike
    } else {
        sqlx::query(
            "INSERT INTO likes (id, tweet_id, user_id, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(tweet_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(pool)
        .await?;
        LikeAction::Like
    };

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM likes WHERE tweet_id = $1")
        .bind(tweet_id)
        .fetch_one(pool)
        .await?;

    Ok((action, count.0))
}

/// Insert a comment and return the created record
#[cfg(feature = "ssr")]
pub async fn insert_comment(
    pool: &PgPool,
    tweet_id: Uuid,
    user_id: Uuid,
    content: String,
) -> Result<CommentRecord, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO comments (id, tweet_id, user_id, content, created_at) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(tweet_id)
    .bind(user_id)
    .bind(&content)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let user = sqlx::query_as::<_, (String, String)>(
        "SELECT username, display_name FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(CommentRecord {
        id,
        content,
        user: TweetAuthor {
            id: user_id,
            username: user.0,
            display_name: user.1,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(n: u32) -> CommentRecord {
        CommentRecord {
            id: Uuid::new_v4(),
            content: format!("comment {n}"),
            user: TweetAuthor {
                id: Uuid::new_v4(),
                username: "alice".to_string(),
                display_name: "Alice".to_string(),
            },
        }
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), DEFAULT_PAGE_LIMIT);
        assert_eq!(clamp_limit(Some(20)), 20);
        assert_eq!(clamp_limit(Some(500)), MAX_PAGE_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
    }

    #[test]
    fn test_sort_by_parse() {
        assert_eq!(SortBy::parse(Some("popular")), SortBy::Popular);
        assert_eq!(SortBy::parse(Some("recent")), SortBy::Recent);
        assert_eq!(SortBy::parse(Some("unknown")), SortBy::Recent);
        assert_eq!(SortBy::parse(None), SortBy::Recent);
    }

    #[test]
    fn test_group_comments_caps_preview_but_counts_all() {
        let tweet = Uuid::new_v4();
        let rows: Vec<_> = (0..8).map(|n| (tweet, comment(n))).collect();
        let grouped = group_comments(rows);
        let (preview, count) = &grouped[&tweet];
        assert_eq!(preview.len(), COMMENT_PREVIEW_LIMIT);
        assert_eq!(*count, 8);
        // Preview keeps row order (newest first as fetched)
        assert_eq!(preview[0].content, "comment 0");
    }

    #[test]
    fn test_group_likes_preserves_order() {
        let tweet = Uuid::new_v4();
        let first = LikeRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
        };
        let second = LikeRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
        };
        let grouped = group_likes(vec![(tweet, first.clone()), (tweet, second.clone())]);
        assert_eq!(grouped[&tweet], vec![first, second]);
    }
}
