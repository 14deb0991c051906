/**
 * Feed State and Controller
 *
 * The Feed Controller reconciles pushed real-time deltas with the
 * independently paginated, cursor-fetched tweet list.
 *
 * # Merge Semantics
 *
 * - A `likes` delta locates the tweet by id: `like` appends a synthetic
 *   like record iff the user is not already recorded as a liker; `unlike`
 *   removes iff present. Tweet ids outside the loaded window are silently
 *   ignored - no fetch is triggered.
 * - A `comments` delta appends a synthetic comment record built from the
 *   payload iff that comment id is not already present.
 * - Merges never mutate the pagination cursor, never re-sort the list, are
 *   O(list length), and are no-ops on already-consistent state - a delta
 *   delivered twice (overlapping poll windows) leaves the state unchanged
 *   the second time.
 *
 * # Mutations
 *
 * The in-memory list is mutated by: initial fetch (replace), pagination
 * fetch (append, never duplicating), new-item check (prepend + pending
 * counter), real-time deltas (patch), and optimistic local actions (like
 * toggle, delete) which are reverted if the server rejects them.
 */
use crate::client::api::FeedApi;
use crate::client::consumer::UpdateHandlers;
use crate::client::error::ClientError;
use crate::shared::{
    CommentDelta, CommentRecord, FeedPage, LikeAction, LikeDelta, LikeRecord, NewTweetDelta,
    Tweet, TweetAuthor,
};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Page size the controller requests from the feed endpoint
pub const FEED_PAGE_SIZE: usize = 20;

/// In-memory, ordered feed state
///
/// Owned behind `Arc<Mutex<_>>` by the controller; only the UI/event
/// callback context mutates it.
#[derive(Debug, Default)]
pub struct FeedState {
    tweets: Vec<Tweet>,
    cursor: Option<String>,
    has_more: bool,
    new_tweets_pending: usize,
    last_fetched_at: Option<DateTime<Utc>>,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tweets(&self) -> &[Tweet] {
        &self.tweets
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn new_tweets_pending(&self) -> usize {
        self.new_tweets_pending
    }

    pub fn last_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.last_fetched_at
    }

    fn contains(&self, tweet_id: Uuid) -> bool {
        self.tweets.iter().any(|t| t.id == tweet_id)
    }

    /// Replace the whole list with a freshly fetched first page
    pub fn replace(&mut self, page: FeedPage) {
        self.has_more = page.has_more && !page.tweets.is_empty();
        self.cursor = page.cursor;
        self.tweets = page.tweets;
        self.new_tweets_pending = 0;
        self.last_fetched_at = Some(Utc::now());
    }

    /// Append a pagination page, skipping tweets already present
    pub fn append_page(&mut self, page: FeedPage) {
        if page.tweets.is_empty() {
            self.has_more = false;
            return;
        }
        for tweet in page.tweets {
            if !self.contains(tweet.id) {
                self.tweets.push(tweet);
            }
        }
        self.cursor = page.cursor;
        self.has_more = page.has_more;
    }

    /// Prepend tweets found by a new-item check, bumping the pending
    /// counter by the number actually added
    pub fn prepend_new(&mut self, tweets: Vec<Tweet>) -> usize {
        let fresh: Vec<Tweet> = tweets
            .into_iter()
            .filter(|t| !self.contains(t.id))
            .collect();
        let added = fresh.len();
        self.new_tweets_pending += added;
        self.tweets.splice(0..0, fresh);
        self.last_fetched_at = Some(Utc::now());
        added
    }

    /// Reset the "new items pending" counter (the user refreshed)
    pub fn clear_pending(&mut self) {
        self.new_tweets_pending = 0;
    }

    /// Apply a batch of like deltas (idempotent upsert/remove)
    pub fn apply_like_deltas(&mut self, deltas: &[LikeDelta]) {
        for delta in deltas {
            let Some(tweet) = self.tweets.iter_mut().find(|t| t.id == delta.tweet_id) else {
                continue;
            };
            let existing = tweet.likes.iter().position(|l| l.user_id == delta.user_id);
            match (delta.action, existing) {
                (LikeAction::Like, None) => {
                    tweet.likes.push(LikeRecord {
                        id: Uuid::nil(),
                        user_id: delta.user_id,
                    });
                    tweet.likes_count += 1;
                }
                (LikeAction::Unlike, Some(index)) => {
                    tweet.likes.remove(index);
                    tweet.likes_count -= 1;
                }
                // Already consistent
                _ => {}
            }
        }
    }

    /// Apply a batch of comment deltas (idempotent append)
    pub fn apply_comment_deltas(&mut self, deltas: &[CommentDelta]) {
        for delta in deltas {
            let Some(tweet) = self.tweets.iter_mut().find(|t| t.id == delta.tweet_id) else {
                continue;
            };
            if tweet.comments.iter().any(|c| c.id == delta.comment_id) {
                continue;
            }
            tweet.comments.push(CommentRecord {
                id: delta.comment_id,
                content: delta.content.clone(),
                user: TweetAuthor {
                    id: delta.user_id,
                    username: delta.username.clone(),
                    display_name: delta.username.clone(),
                },
            });
            tweet.comments_count += 1;
        }
    }

    /// Note a new-tweet notification; the tweet itself arrives via the
    /// next new-item check or refresh
    pub fn record_new_tweet(&mut self, delta: &NewTweetDelta) {
        if !self.contains(delta.id) {
            self.new_tweets_pending += 1;
        }
    }

    /// Optimistically toggle the session user's like on a tweet.
    ///
    /// Returns the action applied, or `None` when the tweet is not loaded.
    pub fn toggle_like_local(&mut self, tweet_id: Uuid, user_id: Uuid) -> Option<LikeAction> {
        let tweet = self.tweets.iter_mut().find(|t| t.id == tweet_id)?;
        match tweet.likes.iter().position(|l| l.user_id == user_id) {
            Some(index) => {
                tweet.likes.remove(index);
                tweet.likes_count -= 1;
                Some(LikeAction::Unlike)
            }
            None => {
                tweet.likes.push(LikeRecord {
                    id: Uuid::nil(),
                    user_id,
                });
                tweet.likes_count += 1;
                Some(LikeAction::Like)
            }
        }
    }

    /// Drop a tweet from the list (after a confirmed delete)
    pub fn remove_tweet(&mut self, tweet_id: Uuid) {
        self.tweets.retain(|t| t.id != tweet_id);
    }
}

/// Drives the feed: pagination fetches, optimistic writes, and the
/// handler set that merges real-time deltas into the shared state.
pub struct FeedController {
    api: FeedApi,
    state: Arc<Mutex<FeedState>>,
    sort_by: String,
}

impl FeedController {
    pub fn new(api: FeedApi) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(FeedState::new())),
            sort_by: "recent".to_string(),
        }
    }

    /// Switch between `recent` and `popular` ordering (takes effect on the
    /// next refresh)
    pub fn set_sort_by(&mut self, sort_by: impl Into<String>) {
        self.sort_by = sort_by.into();
    }

    /// Shared handle to the feed state
    pub fn state(&self) -> Arc<Mutex<FeedState>> {
        Arc::clone(&self.state)
    }

    pub fn api(&self) -> &FeedApi {
        &self.api
    }

    /// Fetch the first page, replacing the current list
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let page = self.api.fetch_page(None, FEED_PAGE_SIZE, &self.sort_by).await?;
        self.state.lock().unwrap().replace(page);
        Ok(())
    }

    /// Fetch the next page past the current cursor
    pub async fn load_more(&self) -> Result<(), ClientError> {
        let cursor = {
            let state = self.state.lock().unwrap();
            if !state.has_more() {
                return Ok(());
            }
            state.cursor().map(str::to_string)
        };
        let page = self
            .api
            .fetch_page(cursor.as_deref(), FEED_PAGE_SIZE, &self.sort_by)
            .await?;
        self.state.lock().unwrap().append_page(page);
        Ok(())
    }

    /// Check for tweets newer than the last fetch and prepend them.
    ///
    /// Returns the number of new tweets found.
    pub async fn check_new(&self) -> Result<usize, ClientError> {
        let since = {
            let state = self.state.lock().unwrap();
            match state.last_fetched_at() {
                Some(t) => t.to_rfc3339(),
                None => return Ok(0),
            }
        };
        let page = self.api.fetch_new_since(&since, FEED_PAGE_SIZE).await?;
        Ok(self.state.lock().unwrap().prepend_new(page.tweets))
    }

    /// Toggle a like optimistically, reverting the local change if the
    /// server rejects it
    pub async fn toggle_like(&self, tweet_id: Uuid) -> Result<(), ClientError> {
        let user_id = self
            .api
            .config()
            .user_id()
            .ok_or(ClientError::NotAuthenticated)?;

        let applied = self
            .state
            .lock()
            .unwrap()
            .toggle_like_local(tweet_id, user_id);
        if applied.is_none() {
            return Ok(());
        }

        match self.api.toggle_like(tweet_id).await {
            Ok(_confirmed) => Ok(()),
            Err(e) => {
                self.state
                    .lock()
                    .unwrap()
                    .toggle_like_local(tweet_id, user_id);
                Err(e)
            }
        }
    }

    /// Post a new tweet and surface it at the top of the feed
    pub async fn post_tweet(&self, content: &str) -> Result<(), ClientError> {
        let tweet = self.api.create_tweet(content).await?;
        self.state.lock().unwrap().prepend_new(vec![tweet]);
        Ok(())
    }

    /// Delete a tweet, dropping it from the list once the server confirms
    pub async fn delete_tweet(&self, tweet_id: Uuid) -> Result<(), ClientError> {
        self.api.delete_tweet(tweet_id).await?;
        self.state.lock().unwrap().remove_tweet(tweet_id);
        Ok(())
    }

    /// Build the handler set that merges real-time deltas into this
    /// controller's state, for wiring into an `UpdateConsumer`
    pub fn handlers(&self) -> UpdateHandlers {
        let like_state = Arc::clone(&self.state);
        let comment_state = Arc::clone(&self.state);
        let new_tweet_state = Arc::clone(&self.state);

        UpdateHandlers::new()
            .on_like(move |deltas| {
                like_state.lock().unwrap().apply_like_deltas(&deltas);
            })
            .on_comment(move |deltas| {
                comment_state.lock().unwrap().apply_comment_deltas(&deltas);
            })
            .on_new_tweet(move |delta| {
                new_tweet_state.lock().unwrap().record_new_tweet(&delta);
            })
            .on_error(|message| {
                tracing::warn!("Real-time channel error: {}", message);
            })
    }
}
