//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication and user
//! endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - User authentication handler
//! ├── me.rs       - Get current user handler
//! └── profile.rs  - User profile handler
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/auth/signup - User registration
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`get_me`** - GET /api/auth/me - Get current user info
//! - **`get_user_profile`** - GET /api/users/{id} - Profile with tweets

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

/// User profile handler
pub mod profile;

// Re-export commonly used types
pub use types::{AuthResponse, LoginRequest, ProfileResponse, SignupRequest, UserResponse};

// Re-export handlers
#[cfg(feature = "ssr")]
pub use login::login;
#[cfg(feature = "ssr")]
pub use me::get_me;
#[cfg(feature = "ssr")]
pub use profile::get_user_profile;
#[cfg(feature = "ssr")]
pub use signup::signup;
