/**
 * Login Handler
 *
 * This module implements the user authentication handler for
 * POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username (or email)
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 * 4. Return token and user info
 *
 * # Security
 *
 * - Invalid credentials return 401 Unauthorized (no information leakage)
 * - Passwords are never returned in responses
 */
use axum::{extract::State, http::StatusCode, response::Json};
#[cfg(feature = "ssr")]
use bcrypt::verify;
#[cfg(feature = "ssr")]
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{get_user_by_email, get_user_by_username};

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `503 Service Unavailable` - If database is not configured
/// * `500 Internal Server Error` - If database query or token generation fails
#[cfg(feature = "ssr")]
pub async fn login(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, StatusCode> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        StatusCode::SERVICE_UNAVAILABLE
    })?;
    tracing::info!("Login request for: {}", request.username);

    // Usernames cannot contain '@', so an '@' means an email lookup
    let user = if request.username.contains('@') {
        get_user_by_email(&pool, &request.username).await
    } else {
        get_user_by_username(&pool, &request.username).await
    };

    let user = user
        .map_err(|e| {
            tracing::error!("Database error: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", request.username);
            StatusCode::UNAUTHORIZED
        })?;

    let valid = verify(&request.password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    if !valid {
        tracing::warn!("Invalid password for user: {}", request.username);
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = create_token(user.id, user.username.clone()).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    tracing::info!("User logged in: {}", user.username);

    Ok(Json(AuthResponse {
        token,
        user: UserResponse {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            display_name: user.display_name,
        },
    }))
}
