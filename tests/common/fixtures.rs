//! Fixture builders for tweets, pages and deltas

use chrono::{TimeZone, Utc};
use uuid::Uuid;
use warbler::shared::{
    CommentDelta, FeedPage, LikeAction, LikeDelta, Tweet, TweetAuthor,
};

/// Build an author with matching username/display name
pub fn author(name: &str) -> TweetAuthor {
    TweetAuthor {
        id: Uuid::new_v4(),
        username: name.to_string(),
        display_name: name.to_string(),
    }
}

/// Build a bare tweet created at the given Unix timestamp
pub fn tweet_at(secs: i64) -> Tweet {
    Tweet {
        id: Uuid::new_v4(),
        content: format!("tweet at {secs}"),
        created_at: Utc.timestamp_opt(secs, 0).unwrap(),
        author: author("alice"),
        likes: Vec::new(),
        comments: Vec::new(),
        likes_count: 0,
        comments_count: 0,
    }
}

/// Build `count` tweets with strictly descending timestamps starting at
/// `newest_secs`
pub fn tweets_descending(newest_secs: i64, count: usize) -> Vec<Tweet> {
    (0..count).map(|i| tweet_at(newest_secs - i as i64)).collect()
}

/// Build a feed page the way the server would deliver it
pub fn page(tweets: Vec<Tweet>, has_more: bool) -> FeedPage {
    let cursor = tweets.last().map(|t| t.created_at.to_rfc3339());
    let count = tweets.len();
    FeedPage {
        tweets,
        cursor,
        has_more,
        count,
    }
}

/// Build a like delta
pub fn like_delta(tweet_id: Uuid, user_id: Uuid, action: LikeAction) -> LikeDelta {
    LikeDelta {
        tweet_id,
        user_id,
        username: "bob".to_string(),
        action,
    }
}

/// Build a comment delta
pub fn comment_delta(tweet_id: Uuid, content: &str) -> CommentDelta {
    CommentDelta {
        tweet_id,
        user_id: Uuid::new_v4(),
        username: "bob".to_string(),
        comment_id: Uuid::new_v4(),
        content: content.to_string(),
    }
}
