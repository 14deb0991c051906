//! Real-time delta merge tests against the public client API

use crate::common::{comment_delta, like_delta, page, tweet_at};
use uuid::Uuid;
use warbler::client::FeedState;
use warbler::shared::LikeAction;

#[test]
fn test_duplicate_delivery_across_poll_windows_is_harmless() {
    // The publisher's 5s window overlaps consecutive 2s ticks, so the same
    // delta can arrive twice; the merged state must not change the second
    // time.
    let mut state = FeedState::new();
    let tweet = tweet_at(100);
    let tweet_id = tweet.id;
    state.replace(page(vec![tweet], false));

    let user = Uuid::new_v4();
    let deltas = vec![like_delta(tweet_id, user, LikeAction::Like)];

    state.apply_like_deltas(&deltas);
    let after_first = state.tweets().to_vec();
    state.apply_like_deltas(&deltas);

    assert_eq!(state.tweets(), after_first.as_slice());
    assert_eq!(state.tweets()[0].likes.len(), 1);
}

#[test]
fn test_unmatched_tweet_id_leaves_list_unchanged() {
    let mut state = FeedState::new();
    state.replace(page(vec![tweet_at(100), tweet_at(90)], false));
    let before = state.tweets().to_vec();

    state.apply_like_deltas(&[like_delta(
        Uuid::new_v4(),
        Uuid::new_v4(),
        LikeAction::Like,
    )]);
    state.apply_comment_deltas(&[comment_delta(Uuid::new_v4(), "nobody sees this")]);

    assert_eq!(state.tweets().len(), before.len());
    assert_eq!(state.tweets(), before.as_slice());
}

#[test]
fn test_comment_merge_builds_synthetic_record() {
    let mut state = FeedState::new();
    let tweet = tweet_at(100);
    let tweet_id = tweet.id;
    state.replace(page(vec![tweet], false));

    let delta = comment_delta(tweet_id, "first!");
    state.apply_comment_deltas(std::slice::from_ref(&delta));

    let comment = &state.tweets()[0].comments[0];
    assert_eq!(comment.id, delta.comment_id);
    assert_eq!(comment.content, "first!");
    assert_eq!(comment.user.username, delta.username);
}

#[test]
fn test_stale_unlike_for_absent_like_is_a_noop() {
    let mut state = FeedState::new();
    let tweet = tweet_at(100);
    let tweet_id = tweet.id;
    state.replace(page(vec![tweet], false));

    state.apply_like_deltas(&[like_delta(
        tweet_id,
        Uuid::new_v4(),
        LikeAction::Unlike,
    )]);

    assert!(state.tweets()[0].likes.is_empty());
    assert_eq!(state.tweets()[0].likes_count, 0);
}
