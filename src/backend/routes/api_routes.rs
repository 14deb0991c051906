/**
 * API Route Handlers
 *
 * This module wires the authentication endpoints into the router.
 *
 * # Routes
 *
 * - `POST /api/auth/signup` - User registration (public)
 * - `POST /api/auth/login` - User login (public)
 * - `GET /api/auth/me` - Get current user info (requires authentication)
 */
use axum::Router;
#[cfg(feature = "ssr")]
use crate::backend::auth::{get_me, login, signup};
#[cfg(feature = "ssr")]
use crate::backend::server::state::AppState;

/// Configure authentication API routes
///
/// `signup` and `login` are public; `me` authenticates through the
/// `AuthUser` extractor.
#[cfg(feature = "ssr")]
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/auth/signup", axum::routing::post(signup))
        .route("/api/auth/login", axum::routing::post(login))
        .route("/api/auth/me", axum::routing::get(get_me))
}
