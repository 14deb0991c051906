//! Router-level API tests

#[cfg(feature = "ssr")]
pub mod routes_test;
