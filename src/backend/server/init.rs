/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Load optional services (database pool + migrations)
 * 2. Create the application state
 * 3. Create and configure the router
 */
#[cfg(feature = "ssr")]
use axum::Router;
#[cfg(feature = "ssr")]
use crate::backend::routes::router::create_router;
#[cfg(feature = "ssr")]
use crate::backend::server::config::load_database;
#[cfg(feature = "ssr")]
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Error Handling
///
/// The function is designed to be resilient: a missing or unreachable
/// database does not prevent startup. Database-backed endpoints respond
/// with 503 until the server is restarted with a working `DATABASE_URL`.
#[cfg(feature = "ssr")]
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing warbler backend server");

    let db_pool = load_database().await;

    let app_state = AppState { db_pool };

    create_router(app_state)
}
