//! Property-based tests for the feed merge semantics

use proptest::prelude::*;
use uuid::Uuid;
use warbler::client::FeedState;
use warbler::shared::{FeedPage, LikeAction, LikeDelta, Tweet, TweetAuthor};

fn tweet_at(secs: i64) -> Tweet {
    use chrono::TimeZone;
    Tweet {
        id: Uuid::new_v4(),
        content: format!("tweet at {secs}"),
        created_at: chrono::Utc.timestamp_opt(secs, 0).unwrap(),
        author: TweetAuthor {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            display_name: "Alice".to_string(),
        },
        likes: Vec::new(),
        comments: Vec::new(),
        likes_count: 0,
        comments_count: 0,
    }
}

fn page(tweets: Vec<Tweet>, has_more: bool) -> FeedPage {
    let cursor = tweets.last().map(|t| t.created_at.to_rfc3339());
    let count = tweets.len();
    FeedPage {
        tweets,
        cursor,
        has_more,
        count,
    }
}

/// A delta description over small index pools: tweet slot (0..5, slots >= 3
/// do not exist in the feed), user slot (0..3), and the action.
fn delta_descriptions() -> impl Strategy<Value = Vec<(usize, usize, bool)>> {
    prop::collection::vec((0usize..5, 0usize..3, any::<bool>()), 0..24)
}

fn build_state() -> (FeedState, Vec<Uuid>, Vec<Uuid>) {
    let tweets: Vec<Tweet> = (0..3).map(|i| tweet_at(1_000_000 - i)).collect();
    let tweet_ids: Vec<Uuid> = tweets.iter().map(|t| t.id).collect();
    // Slots 3 and 4 reference tweets outside the loaded window
    let mut all_ids = tweet_ids.clone();
    all_ids.push(Uuid::new_v4());
    all_ids.push(Uuid::new_v4());
    let users: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();

    let mut state = FeedState::new();
    state.replace(page(tweets, true));
    (state, all_ids, users)
}

fn build_deltas(
    descriptions: &[(usize, usize, bool)],
    tweet_ids: &[Uuid],
    users: &[Uuid],
) -> Vec<LikeDelta> {
    descriptions
        .iter()
        .map(|&(tweet_slot, user_slot, like)| LikeDelta {
            tweet_id: tweet_ids[tweet_slot],
            user_id: users[user_slot],
            username: format!("user{user_slot}"),
            action: if like {
                LikeAction::Like
            } else {
                LikeAction::Unlike
            },
        })
        .collect()
}

proptest! {
    /// Applying the same delta batch twice equals applying it once.
    #[test]
    fn test_like_merge_is_idempotent(descriptions in delta_descriptions()) {
        let (mut state, tweet_ids, users) = build_state();
        let deltas = build_deltas(&descriptions, &tweet_ids, &users);

        state.apply_like_deltas(&deltas);
        let once = state.tweets().to_vec();
        state.apply_like_deltas(&deltas);

        prop_assert_eq!(state.tweets(), once.as_slice());
    }

    /// Merges never touch the cursor, the list order, or its length.
    #[test]
    fn test_merge_preserves_pagination_invariants(descriptions in delta_descriptions()) {
        let (mut state, tweet_ids, users) = build_state();
        let deltas = build_deltas(&descriptions, &tweet_ids, &users);

        let cursor_before = state.cursor().map(str::to_string);
        let order_before: Vec<Uuid> = state.tweets().iter().map(|t| t.id).collect();

        state.apply_like_deltas(&deltas);

        let order_after: Vec<Uuid> = state.tweets().iter().map(|t| t.id).collect();
        prop_assert_eq!(state.cursor().map(str::to_string), cursor_before);
        prop_assert_eq!(order_after, order_before);
    }

    /// Like counts always equal the number of like records, and a user is
    /// recorded at most once per tweet.
    #[test]
    fn test_merge_keeps_counts_consistent(descriptions in delta_descriptions()) {
        let (mut state, tweet_ids, users) = build_state();
        let deltas = build_deltas(&descriptions, &tweet_ids, &users);

        state.apply_like_deltas(&deltas);

        for tweet in state.tweets() {
            prop_assert_eq!(tweet.likes_count, tweet.likes.len() as i64);
            let mut seen = std::collections::HashSet::new();
            prop_assert!(tweet.likes.iter().all(|l| seen.insert(l.user_id)));
        }
    }

    /// Deltas that only reference unloaded tweets leave the state unchanged.
    #[test]
    fn test_unmatched_deltas_are_noops(
        descriptions in prop::collection::vec((3usize..5, 0usize..3, any::<bool>()), 0..12)
    ) {
        let (mut state, tweet_ids, users) = build_state();
        let deltas = build_deltas(&descriptions, &tweet_ids, &users);
        let before = state.tweets().to_vec();

        state.apply_like_deltas(&deltas);

        prop_assert_eq!(state.tweets(), before.as_slice());
    }
}
