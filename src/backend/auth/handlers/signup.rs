/**
 * Signup Handler
 *
 * This module implements the user registration handler for
 * POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate username, email and password
 * 2. Hash the password with bcrypt
 * 3. Insert the user row
 * 4. Generate a JWT token
 *
 * # Security
 *
 * - Passwords are hashed with bcrypt before storage
 * - Duplicate usernames/emails return 409 Conflict
 */
use axum::{extract::State, http::StatusCode, response::Json};
#[cfg(feature = "ssr")]
use bcrypt::hash;
#[cfg(feature = "ssr")]
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest, UserResponse};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, is_valid_username};

/// Signup handler
///
/// # Errors
///
/// * `400 Bad Request` - Invalid username, email or password
/// * `409 Conflict` - Username or email already taken
/// * `503 Service Unavailable` - Database not configured
/// * `500 Internal Server Error` - Hashing, insert or token generation failure
#[cfg(feature = "ssr")]
pub async fn signup(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, StatusCode> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    if !is_valid_username(&request.username) {
        tracing::warn!("Rejected signup with invalid username");
        return Err(StatusCode::BAD_REQUEST);
    }
    if !request.email.contains('@') || request.password.len() < 8 {
        return Err(StatusCode::BAD_REQUEST);
    }

    let password_hash = hash(&request.password, bcrypt::DEFAULT_COST).map_err(|e| {
        tracing::error!("Password hashing error: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let user = create_user(&pool, request.username, request.email, password_hash)
        .await
        .map_err(|e| match &e {
            // Unique violations surface as 409 instead of 500
            sqlx::Error::Database(db) if db.is_unique_violation() => StatusCode::CONFLICT,
            _ => {
                tracing::error!("Failed to create user: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;

    let token = create_token(user.id, user.username.clone()).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    tracing::info!("User registered: {}", user.username);

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
