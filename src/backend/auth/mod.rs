//! Authentication Module
//!
//! This module handles user authentication, registration, and session
//! management. It provides HTTP handlers for authentication endpoints and
//! manages user data and JWT tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: username/email/password → user created → JWT token returned
//! 2. **Login**: username/password → credentials verified → JWT token returned
//! 3. **Authenticated requests**: `Authorization: Bearer <token>` verified by
//!    the auth middleware, which injects the caller's identity
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT tokens are used for stateless authentication (7-day expiry)
//! - Invalid credentials return 401 (no information leakage)

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest, UserResponse};
#[cfg(feature = "ssr")]
pub use handlers::{get_me, get_user_profile, login, signup};
