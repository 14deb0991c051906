//! Update Publisher tick assembly and protocol constants

use uuid::Uuid;
use warbler::backend::realtime::{
    tick_events, window_start, LOOKBACK_WINDOW_SECS, MAX_ROWS_PER_POLL, POLL_INTERVAL_SECS,
};
use warbler::shared::{CommentDelta, LikeAction, LikeDelta, UpdateEvent};

fn like() -> LikeDelta {
    LikeDelta {
        tweet_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        username: "alice".to_string(),
        action: LikeAction::Like,
    }
}

fn comment() -> CommentDelta {
    CommentDelta {
        tweet_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        username: "alice".to_string(),
        comment_id: Uuid::new_v4(),
        content: "hello".to_string(),
    }
}

#[test]
fn test_protocol_constants() {
    assert_eq!(POLL_INTERVAL_SECS, 2);
    assert_eq!(LOOKBACK_WINDOW_SECS, 5);
    assert_eq!(MAX_ROWS_PER_POLL, 10);
}

#[test]
fn test_no_event_kinds_are_lost_in_a_mixed_tick() {
    let events = tick_events(vec![like()], vec![comment()]);
    let kinds: Vec<_> = events.iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, ["likes", "comments"]);
}

#[test]
fn test_tick_events_preserve_store_order() {
    let first = like();
    let second = like();
    let events = tick_events(vec![first.clone(), second.clone()], Vec::new());
    match &events[0] {
        UpdateEvent::Likes { data } => {
            assert_eq!(data[0], first);
            assert_eq!(data[1], second);
        }
        other => panic!("Expected likes event, got {:?}", other),
    }
}

#[test]
fn test_window_correctness_for_any_tick_in_range() {
    // A row created at t must be included by any poll tick in [t, t+5s]
    let created = chrono::Utc::now();
    for offset_ms in [0i64, 500, 1999, 2000, 4999, 5000] {
        let tick_at = created + chrono::Duration::milliseconds(offset_ms);
        assert!(
            window_start(tick_at) <= created,
            "tick {offset_ms}ms after creation must still cover the row"
        );
    }
}

#[test]
fn test_events_serialize_to_the_wire_contract() {
    // The publisher writes serde_json output straight into SSE data frames
    let delta = like();
    let json =
        serde_json::to_value(UpdateEvent::likes(vec![delta.clone()])).unwrap();

    assert_eq!(json["type"], "likes");
    assert_eq!(json["data"][0]["tweetId"], delta.tweet_id.to_string());
    assert_eq!(json["data"][0]["userId"], delta.user_id.to_string());
    assert_eq!(json["data"][0]["action"], "like");
}
