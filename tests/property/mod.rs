//! Property-based tests

pub mod backoff_proptest;
pub mod merge_proptest;
