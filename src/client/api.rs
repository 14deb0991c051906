/**
 * Feed API Client
 *
 * Thin reqwest wrapper over the server's feed endpoints. The Feed
 * Controller drives this for pagination and writes; the real-time stream
 * is handled separately by the Update Consumer.
 */
use crate::client::config::Config;
use crate::client::error::ClientError;
use crate::shared::{CommentRecord, FeedPage, LikeToggle, Tweet};
use reqwest::{Client, RequestBuilder};
use uuid::Uuid;

/// HTTP client for the feed endpoints
#[derive(Debug, Clone)]
pub struct FeedApi {
    config: Config,
    client: Client,
}

impl FeedApi {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Attach the session token, or fail when no session is installed
    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.config.token().ok_or(ClientError::NotAuthenticated)?;
        Ok(request.bearer_auth(token))
    }

    /// Fetch one feed page (GET /api/tweets)
    ///
    /// `cursor` selects tweets strictly older than the given timestamp.
    pub async fn fetch_page(
        &self,
        cursor: Option<&str>,
        limit: usize,
        sort_by: &str,
    ) -> Result<FeedPage, ClientError> {
        let mut params = vec![
            ("limit".to_string(), limit.to_string()),
            ("sortBy".to_string(), sort_by.to_string()),
        ];
        if let Some(cursor) = cursor {
            params.push(("cursor".to_string(), cursor.to_string()));
        }

        let page = self
            .client
            .get(self.config.api_url("/api/tweets"))
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<FeedPage>()
            .await?;
        Ok(page)
    }

    /// Fetch tweets created strictly after `since` (new-item check)
    pub async fn fetch_new_since(
        &self,
        since: &str,
        limit: usize,
    ) -> Result<FeedPage, ClientError> {
        let params = vec![
            ("limit".to_string(), limit.to_string()),
            ("since".to_string(), since.to_string()),
        ];

        let page = self
            .client
            .get(self.config.api_url("/api/tweets"))
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<FeedPage>()
            .await?;
        Ok(page)
    }

    /// Create a tweet (POST /api/tweets)
    pub async fn create_tweet(&self, content: &str) -> Result<Tweet, ClientError> {
        let request = self
            .authorized(self.client.post(self.config.api_url("/api/tweets")))?
            .json(&serde_json::json!({ "content": content }));

        let tweet = request
            .send()
            .await?
            .error_for_status()?
            .json::<Tweet>()
            .await?;
        Ok(tweet)
    }

    /// Toggle a like (POST /api/tweets/{id}/like)
    pub async fn toggle_like(&self, tweet_id: Uuid) -> Result<LikeToggle, ClientError> {
        let url = self.config.api_url(&format!("/api/tweets/{}/like", tweet_id));
        let toggle = self
            .authorized(self.client.post(url))?
            .send()
            .await?
            .error_for_status()?
            .json::<LikeToggle>()
            .await?;
        Ok(toggle)
    }

    /// Add a comment (POST /api/tweets/{id}/comments)
    pub async fn add_comment(
        &self,
        tweet_id: Uuid,
        content: &str,
    ) -> Result<CommentRecord, ClientError> {
        let url = self
            .config
            .api_url(&format!("/api/tweets/{}/comments", tweet_id));
        let comment = self
            .authorized(self.client.post(url))?
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?
            .error_for_status()?
            .json::<CommentRecord>()
            .await?;
        Ok(comment)
    }

    /// Delete a tweet (DELETE /api/tweets/{id})
    pub async fn delete_tweet(&self, tweet_id: Uuid) -> Result<(), ClientError> {
        let url = self.config.api_url(&format!("/api/tweets/{}", tweet_id));
        self.authorized(self.client.delete(url))?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
