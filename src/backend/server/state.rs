/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container for the application. It is
 * deliberately small: every request either reads the database through the
 * shared pool or needs no state at all. Real-time subscriptions own their
 * polling loop inside the response stream, so no cross-connection state is
 * held here.
 *
 * # Thread Safety
 *
 * - `PgPool` is internally synchronized and cheap to clone
 * - Optional services are `Option<T>`, absent when not configured
 */
#[cfg(feature = "ssr")]
use axum::extract::FromRef;
#[cfg(feature = "ssr")]
use sqlx::PgPool;

/// Application state shared by all handlers
///
/// # Fields
///
/// * `db_pool` - Optional PostgreSQL connection pool. `None` when
///   `DATABASE_URL` is not set; database-backed handlers respond with
///   503 in that case rather than the server refusing to start.
#[cfg(feature = "ssr")]
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, absent when the database is not configured
    pub db_pool: Option<PgPool>,
}

#[cfg(feature = "ssr")]
/// Implement FromRef for Option<PgPool>
///
/// This allows Axum handlers to extract the optional database pool
/// directly from `AppState` via `State(pool): State<Option<PgPool>>`.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
