//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports
//! ├── router.rs     - Router assembly
//! └── api_routes.rs - Auth API routes
//! ```

/// Router assembly
pub mod router;

/// Auth API routes
pub mod api_routes;

#[cfg(feature = "ssr")]
pub use router::create_router;
