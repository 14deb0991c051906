//! Pagination cursor invariant tests

use crate::common::{page, tweets_descending};
use warbler::client::FeedState;
use warbler::shared::FeedPage;

#[test]
fn test_overfetched_page_surfaces_exactly_limit_rows() {
    // 21 rows fetched for limit=20: hasMore, 20 surfaced, cursor = 20th row
    let rows = tweets_descending(1_000_000, 21);
    let twentieth = rows[19].created_at;

    let feed_page = FeedPage::from_overfetched(rows, 20);

    assert!(feed_page.has_more);
    assert_eq!(feed_page.tweets.len(), 20);
    assert_eq!(feed_page.count, 20);
    assert_eq!(feed_page.cursor, Some(twentieth.to_rfc3339()));
}

#[test]
fn test_short_page_reports_no_more() {
    let rows = tweets_descending(1_000_000, 7);
    let feed_page = FeedPage::from_overfetched(rows, 20);

    assert!(!feed_page.has_more);
    assert_eq!(feed_page.count, 7);
}

#[test]
fn test_cursor_chains_across_pages_without_duplicates() {
    // Feed of 30 tweets paged by 20: the second page starts past the cursor
    let all = tweets_descending(1_000_000, 30);

    let first_page = FeedPage::from_overfetched(all[..21].to_vec(), 20);
    let cursor = first_page.cursor.clone().expect("cursor for full page");

    // The store would select created_at < cursor
    let cursor_ts = chrono::DateTime::parse_from_rfc3339(&cursor)
        .unwrap()
        .with_timezone(&chrono::Utc);
    let rest: Vec<_> = all
        .iter()
        .filter(|t| t.created_at < cursor_ts)
        .cloned()
        .collect();
    let second_page = FeedPage::from_overfetched(rest, 20);

    let mut state = FeedState::new();
    state.replace(first_page);
    state.append_page(second_page);

    assert_eq!(state.tweets().len(), 30);
    let mut seen = std::collections::HashSet::new();
    assert!(state.tweets().iter().all(|t| seen.insert(t.id)));
    assert!(!state.has_more());
}

#[test]
fn test_append_skips_boundary_duplicates() {
    let all = tweets_descending(1_000_000, 4);
    let mut state = FeedState::new();
    state.replace(page(all[..2].to_vec(), true));

    // The next page erroneously includes the boundary tweet again
    state.append_page(page(all[1..].to_vec(), false));

    assert_eq!(state.tweets().len(), 4);
}
