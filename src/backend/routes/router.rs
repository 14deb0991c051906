/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Groups
 *
 * 1. Feed routes: the tweet list is public to read; writes require a
 *    session, enforced by the `AuthUser` extractor on the handlers
 * 2. Protected routes: grouped behind the auth middleware so the request
 *    is rejected before the handler runs (the realtime subscription in
 *    particular must reject before any stream is opened)
 * 3. API routes: signup/login are public by nature
 */
use axum::Router;
#[cfg(feature = "ssr")]
use crate::backend::middleware::auth::auth_middleware;
#[cfg(feature = "ssr")]
use crate::backend::routes::api_routes::configure_api_routes;
#[cfg(feature = "ssr")]
use crate::backend::server::state::AppState;
#[cfg(feature = "ssr")]
use tower_http::trace::TraceLayer;

/// Create the Axum router with all routes configured
///
/// # Route Details
///
/// ## Feed Routes
///
/// - `GET /api/tweets` - Cursor-paginated feed (public)
/// - `POST /api/tweets` - Create tweet (authenticated via extractor)
///
/// ## Protected Routes (auth middleware)
///
/// - `GET /api/tweets/realtime` - Real-time update subscription
/// - `DELETE /api/tweets/{id}` - Delete own tweet
/// - `POST /api/tweets/{id}/like` - Toggle like
/// - `POST /api/tweets/{id}/comments` - Add comment
/// - `GET /api/users/{id}` - User profile
///
/// ## API Routes
///
/// - `POST /api/auth/signup` - User registration (public)
/// - `POST /api/auth/login` - User login (public)
/// - `GET /api/auth/me` - Current user (authenticated via extractor)
///
/// ## Fallback
///
/// The fallback handler returns 404 for unknown routes.
#[cfg(feature = "ssr")]
pub fn create_router(app_state: AppState) -> Router<()> {
    let protected = Router::new()
        .route(
            "/api/tweets/realtime",
            axum::routing::get({
                use crate::backend::realtime::publisher::handle_realtime_subscription;
                handle_realtime_subscription
            }),
        )
        .route(
            "/api/tweets/{id}",
            axum::routing::delete({
                use crate::backend::tweets::handlers::delete_tweet;
                delete_tweet
            }),
        )
        .route(
            "/api/tweets/{id}/like",
            axum::routing::post({
                use crate::backend::tweets::handlers::like_tweet;
                like_tweet
            }),
        )
        .route(
            "/api/tweets/{id}/comments",
            axum::routing::post({
                use crate::backend::tweets::handlers::create_comment;
                create_comment
            }),
        )
        .route(
            "/api/users/{id}",
            axum::routing::get({
                use crate::backend::auth::handlers::get_user_profile;
                get_user_profile
            }),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let router = Router::new()
        .route(
            "/api/tweets",
            axum::routing::get({
                use crate::backend::tweets::handlers::list_tweets;
                list_tweets
            })
            .post({
                use crate::backend::tweets::handlers::create_tweet;
                create_tweet
            }),
        )
        .merge(protected);

    // Add auth API routes
    let router = configure_api_routes(router);

    // Fallback handler for 404
    let router = router.fallback(|| async {
        (axum::http::StatusCode::NOT_FOUND, "404 Not Found")
    });

    router.layer(TraceLayer::new_for_http()).with_state(app_state)
}
