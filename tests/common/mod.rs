//! Common test utilities and helpers
//!
//! This module provides shared fixtures for building tweets, feed pages
//! and realtime deltas.

pub mod fixtures;

pub use fixtures::*;
