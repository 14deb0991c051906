/**
 * Authentication Middleware
 *
 * This module provides authentication for protected routes. It extracts
 * and verifies JWT tokens from the Authorization header and provides the
 * caller's identity to handlers.
 *
 * Two entry points share one verification path:
 *
 * - `auth_middleware` - a route layer for groups of protected routes;
 *   rejects before the handler runs and caches the identity in request
 *   extensions
 * - `AuthUser` - an extractor for handlers; uses the cached identity when
 *   the middleware ran, otherwise authenticates directly from the headers
 *   (for routes whose sibling methods are public)
 */
use crate::backend::auth::sessions::verify_token;
use crate::backend::server::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
#[cfg(feature = "ssr")]
use sqlx::PgPool;
use uuid::Uuid;

/// Authenticated user data extracted from a verified JWT token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
}

/// Verify the Authorization header and resolve the caller's identity
///
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies the token signature and expiry
/// 3. Confirms the user row still exists (when a database is configured)
///
/// Returns 401 Unauthorized if any step fails.
#[cfg(feature = "ssr")]
pub async fn authenticate(
    headers: &HeaderMap,
    db_pool: &Option<PgPool>,
) -> Result<AuthenticatedUser, StatusCode> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            StatusCode::UNAUTHORIZED
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        StatusCode::UNAUTHORIZED
    })?;

    let claims = verify_token(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        StatusCode::UNAUTHORIZED
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::error!("Invalid user ID in token: {:?}", e);
        StatusCode::UNAUTHORIZED
    })?;

    // A deleted account must not keep a working token
    if let Some(pool) = db_pool {
        if let Err(e) = verify_user_exists(pool, user_id).await {
            tracing::warn!("User not found in database: {:?}", e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    }

    Ok(AuthenticatedUser {
        user_id,
        username: claims.username,
    })
}

/// Authentication middleware for grouped protected routes
///
/// Attaches [`AuthenticatedUser`] to request extensions on success and
/// rejects with 401 before the handler runs otherwise.
#[cfg(feature = "ssr")]
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let user = authenticate(request.headers(), &app_state.db_pool).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Verify user exists in database
#[cfg(feature = "ssr")]
async fn verify_user_exists(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    use crate::backend::auth::users::get_user_by_id;

    get_user_by_id(pool, user_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    Ok(())
}

/// Axum extractor for the authenticated user
///
/// On routes behind [`auth_middleware`] this reads the cached identity from
/// request extensions; elsewhere it authenticates from the headers itself.
/// Either way, an unauthenticated request is rejected with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(AuthUser(user.clone()));
        }

        let user = authenticate(&parts.headers, &state.db_pool).await?;
        Ok(AuthUser(user))
    }
}

#[cfg(test)]
#[cfg(feature = "ssr")]
mod tests {
    use super::*;
    use crate::backend::auth::sessions::create_token;
    use axum::extract::FromRequestParts;

    fn state() -> AppState {
        AppState { db_pool: None }
    }

    #[tokio::test]
    async fn test_extractor_uses_cached_identity() {
        let user = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            username: "alice".to_string(),
        };
        let request = axum::http::Request::builder()
            .uri("http://example.com")
            .extension(user.clone())
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let AuthUser(found) = AuthUser::from_request_parts(&mut parts, &state())
            .await
            .expect("extractor should succeed");
        assert_eq!(found.user_id, user.user_id);
        assert_eq!(found.username, "alice");
    }

    #[tokio::test]
    async fn test_extractor_authenticates_from_headers() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id, "bob".to_string()).unwrap();
        let request = axum::http::Request::builder()
            .uri("http://example.com")
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let AuthUser(found) = AuthUser::from_request_parts(&mut parts, &state())
            .await
            .expect("extractor should succeed");
        assert_eq!(found.user_id, user_id);
        assert_eq!(found.username, "bob");
    }

    #[tokio::test]
    async fn test_extractor_rejects_missing_header() {
        let request = axum::http::Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let extracted = AuthUser::from_request_parts(&mut parts, &state()).await;
        assert_eq!(extracted.unwrap_err(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_extractor_rejects_malformed_header() {
        let request = axum::http::Request::builder()
            .uri("http://example.com")
            .header(AUTHORIZATION, "Token abc")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let extracted = AuthUser::from_request_parts(&mut parts, &state()).await;
        assert_eq!(extracted.unwrap_err(), StatusCode::UNAUTHORIZED);
    }
}
