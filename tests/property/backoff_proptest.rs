//! Property-based tests for the reconnect backoff schedule

use proptest::prelude::*;
use std::time::Duration;
use warbler::client::consumer::reconnect_delay;

proptest! {
    #[test]
    fn test_backoff_matches_formula(attempt in 0u32..64) {
        let expected_ms = 1000u64
            .saturating_mul(2u64.saturating_pow(attempt))
            .min(30_000);
        prop_assert_eq!(reconnect_delay(attempt), Duration::from_millis(expected_ms));
    }

    #[test]
    fn test_backoff_is_monotonic(attempt in 0u32..63) {
        prop_assert!(reconnect_delay(attempt) <= reconnect_delay(attempt + 1));
    }

    #[test]
    fn test_backoff_never_exceeds_cap(attempt in 0u32..1024) {
        prop_assert!(reconnect_delay(attempt) <= Duration::from_secs(30));
    }
}

#[test]
fn test_documented_schedule() {
    let schedule: Vec<u64> = (0..5).map(|a| reconnect_delay(a).as_secs()).collect();
    assert_eq!(schedule, [1, 2, 4, 8, 16]);
}
