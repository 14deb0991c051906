/**
 * Tweet API Handlers
 *
 * This module implements the feed endpoints:
 *
 * - `GET /api/tweets` - cursor-paginated feed (public)
 * - `POST /api/tweets` - create a tweet (authenticated)
 * - `DELETE /api/tweets/{id}` - delete own tweet (authenticated)
 * - `POST /api/tweets/{id}/like` - toggle a like (authenticated)
 * - `POST /api/tweets/{id}/comments` - add a comment (authenticated)
 *
 * # Pagination
 *
 * `cursor` is the RFC3339 timestamp of the oldest tweet of the previous
 * page and selects strictly older tweets. `since` selects strictly newer
 * tweets and is used by clients to check for new items without disturbing
 * their cursor. `limit` defaults to 10 and is capped at 50.
 */
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::tweets::db::{
    self, clamp_limit, FeedFilter, SortBy,
};
use crate::shared::{CommentRecord, FeedPage, LikeToggle, SharedError, Tweet};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ssr")]
use sqlx::PgPool;
use uuid::Uuid;

/// Query parameters for GET /api/tweets
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedParams {
    /// Pagination cursor: RFC3339 timestamp, exclusive upper bound
    pub cursor: Option<String>,
    /// New-item check: RFC3339 timestamp, exclusive lower bound
    pub since: Option<String>,
    /// Page size (default 10, max 50)
    pub limit: Option<u32>,
    /// `recent` (default) or `popular`
    pub sort_by: Option<String>,
}

/// Request body for POST /api/tweets
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTweetRequest {
    /// Tweet body, must be non-empty
    pub content: String,
}

/// Request body for POST /api/tweets/{id}/comments
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    /// Comment body, must be non-empty
    pub content: String,
}

/// Parse the time filter out of the feed parameters.
///
/// `since` wins over `cursor` when both are present, matching the client's
/// usage (a new-item check never paginates).
pub fn parse_filter(params: &FeedParams) -> Result<FeedFilter, SharedError> {
    fn parse(field: &'static str, value: &str) -> Result<DateTime<Utc>, SharedError> {
        DateTime::parse_from_rfc3339(value)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| SharedError::validation(field, format!("invalid timestamp: {e}")))
    }

    if let Some(since) = &params.since {
        Ok(FeedFilter::Since(parse("since", since)?))
    } else if let Some(cursor) = &params.cursor {
        Ok(FeedFilter::Before(parse("cursor", cursor)?))
    } else {
        Ok(FeedFilter::None)
    }
}

/// List tweets with cursor-based pagination (GET /api/tweets)
///
/// Public: reading the feed does not require a session.
#[cfg(feature = "ssr")]
pub async fn list_tweets(
    State(pool): State<Option<PgPool>>,
    Query(params): Query<FeedParams>,
) -> Result<Json<FeedPage>, ApiError> {
    let pool = pool.ok_or_else(|| ApiError::unavailable("Database not configured"))?;

    let filter = parse_filter(&params)?;
    let limit = clamp_limit(params.limit);
    let sort_by = SortBy::parse(params.sort_by.as_deref());

    let page = db::load_feed_page(&pool, filter, limit, sort_by).await?;
    tracing::debug!(
        "Feed page served: {} tweets, has_more={}",
        page.count,
        page.has_more
    );
    Ok(Json(page))
}

/// Create a tweet (POST /api/tweets)
#[cfg(feature = "ssr")]
pub async fn create_tweet(
    AuthUser(user): AuthUser,
    State(pool): State<Option<PgPool>>,
    Json(request): Json<CreateTweetRequest>,
) -> Result<(StatusCode, Json<Tweet>), ApiError> {
    let pool = pool.ok_or_else(|| ApiError::unavailable("Database not configured"))?;

    if request.content.trim().is_empty() {
        return Err(ApiError::bad_request("Content is required"));
    }

    let tweet = db::insert_tweet(&pool, user.user_id, request.content).await?;
    tracing::info!("Tweet created by {}", user.username);
    Ok((StatusCode::CREATED, Json(tweet)))
}

/// Delete a tweet (DELETE /api/tweets/{id})
///
/// Only the author may delete a tweet.
#[cfg(feature = "ssr")]
pub async fn delete_tweet(
    AuthUser(user): AuthUser,
    State(pool): State<Option<PgPool>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let pool = pool.ok_or_else(|| ApiError::unavailable("Database not configured"))?;

    let author = db::tweet_author(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tweet not found"))?;
    if author != user.user_id {
        return Err(ApiError::forbidden("Only the author can delete a tweet"));
    }

    db::delete_tweet(&pool, id).await?;
    tracing::info!("Tweet {} deleted by {}", id, user.username);
    Ok(StatusCode::NO_CONTENT)
}

/// Toggle a like (POST /api/tweets/{id}/like)
#[cfg(feature = "ssr")]
pub async fn like_tweet(
    AuthUser(user): AuthUser,
    State(pool): State<Option<PgPool>>,
    Path(id): Path<Uuid>,
) -> Result<Json<LikeToggle>, ApiError> {
    let pool = pool.ok_or_else(|| ApiError::unavailable("Database not configured"))?;

    db::tweet_author(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tweet not found"))?;

    let (action, likes_count) = db::toggle_like(&pool, id, user.user_id).await?;
    Ok(Json(LikeToggle {
        action,
        likes_count,
    }))
}

/// Add a comment (POST /api/tweets/{id}/comments)
#[cfg(feature = "ssr")]
pub async fn create_comment(
    AuthUser(user): AuthUser,
    State(pool): State<Option<PgPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentRecord>), ApiError> {
    let pool = pool.ok_or_else(|| ApiError::unavailable("Database not configured"))?;

    if request.content.trim().is_empty() {
        return Err(ApiError::bad_request("Content is required"));
    }

    db::tweet_author(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tweet not found"))?;

    let comment = db::insert_comment(&pool, id, user.user_id, request.content).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
