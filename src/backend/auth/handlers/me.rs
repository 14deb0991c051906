/**
 * Get Current User Handler
 *
 * This module implements the handler for GET /api/auth/me, which returns
 * the authenticated user's own record.
 */
use axum::{extract::State, http::StatusCode, response::Json};
#[cfg(feature = "ssr")]
use sqlx::PgPool;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::middleware::auth::AuthUser;

/// Get current user handler
///
/// The auth middleware has already verified the token; this handler loads
/// the fresh user row so the response reflects the database, not the claims.
///
/// # Errors
///
/// * `401 Unauthorized` - If the user row no longer exists
/// * `503 Service Unavailable` - If database is not configured
#[cfg(feature = "ssr")]
pub async fn get_me(
    AuthUser(user): AuthUser,
    State(pool): State<Option<PgPool>>,
) -> Result<Json<UserResponse>, StatusCode> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    let record = get_user_by_id(&pool, user.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Database error: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    Ok(Json(UserResponse {
        id: record.id.to_string(),
        username: record.username,
        email: record.email,
        display_name: record.display_name,
    }))
}
