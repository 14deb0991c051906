/**
 * User Profile Handler
 *
 * This module implements the handler for GET /api/users/{id}: a user's
 * public profile plus their tweets, newest first. Profiles are only visible
 * to logged-in users.
 */
use axum::{
    extract::{Path, State},
    response::Json,
};
#[cfg(feature = "ssr")]
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::handlers::types::ProfileResponse;
use crate::backend::auth::users::{count_tweets_by_author, get_user_by_id};
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::tweets::db::tweets_by_author;

/// Get a user's profile and tweets
///
/// # Errors
///
/// * `401 Unauthorized` - Caller is not authenticated
/// * `404 Not Found` - No such user
/// * `503 Service Unavailable` - Database not configured
#[cfg(feature = "ssr")]
pub async fn get_user_profile(
    AuthUser(_caller): AuthUser,
    State(pool): State<Option<PgPool>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let pool = pool.ok_or_else(|| ApiError::unavailable("Database not configured"))?;

    let user = get_user_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let tweets_count = count_tweets_by_author(&pool, id).await?;
    let tweets = tweets_by_author(&pool, id).await?;

    Ok(Json(ProfileResponse {
        id: user.id.to_string(),
        username: user.username,
        display_name: user.display_name,
        bio: user.bio,
        tweets_count,
        tweets,
    }))
}
