//! Real-time subsystem integration tests

pub mod consumer_test;
#[cfg(feature = "ssr")]
pub mod publisher_test;
