/**
 * Update Consumer
 *
 * This module implements the client half of the real-time subsystem: a
 * reconnecting Server-Sent-Events consumer that parses incoming
 * [`UpdateEvent`] frames, dispatches them to a registered handler set, and
 * recovers from transport failures with exponential backoff.
 *
 * # Connection Lifecycle
 *
 * `connect` is idempotent: it does nothing when the consumer is disabled,
 * has no session, or already holds a live subscription task. The
 * subscription task owns the whole connect/read/backoff loop, so
 * `disconnect` only has to abort the task to atomically cancel both the
 * active connection and any pending reconnect timer - a timer can never
 * fire after disconnect and open a stray connection.
 *
 * # Reconnection
 *
 * After a transport failure the task sleeps `min(1000 * 2^attempt, 30000)`
 * milliseconds and reconnects, incrementing the attempt counter first. A
 * successful open resets the counter. After [`MAX_RECONNECT_ATTEMPTS`]
 * consecutive failures the task reports a terminal error through the
 * `on_error` handler and stops.
 *
 * # Frame Handling
 *
 * A malformed frame is logged and dropped; it never tears down the
 * connection. Dispatch over the event kinds is exhaustive.
 */
use crate::client::config::Config;
use crate::client::error::ClientError;
use crate::shared::{CommentDelta, LikeDelta, NewTweetDelta, UpdateEvent};
use futures_util::StreamExt;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Reconnect attempts before giving up
pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;

/// Base reconnect delay in milliseconds
pub const BASE_RECONNECT_DELAY_MS: u64 = 1_000;

/// Cap on the reconnect delay in milliseconds
pub const MAX_RECONNECT_DELAY_MS: u64 = 30_000;

/// The backoff delay before reconnect attempt number `attempt` (0-based)
pub fn reconnect_delay(attempt: u32) -> Duration {
    let millis = BASE_RECONNECT_DELAY_MS
        .saturating_mul(2u64.saturating_pow(attempt))
        .min(MAX_RECONNECT_DELAY_MS);
    Duration::from_millis(millis)
}

type LikeHandler = Box<dyn Fn(Vec<LikeDelta>) + Send + Sync>;
type CommentHandler = Box<dyn Fn(Vec<CommentDelta>) + Send + Sync>;
type NewTweetHandler = Box<dyn Fn(NewTweetDelta) + Send + Sync>;
type ErrorHandler = Box<dyn Fn(String) + Send + Sync>;

/// The handler set an [`UpdateConsumer`] dispatches into
///
/// Handlers are registered at construction time and owned by the
/// subscription, keeping the subscription's lifecycle independent of any
/// single owning context. Unregistered kinds are ignored.
#[derive(Default)]
pub struct UpdateHandlers {
    on_like: Option<LikeHandler>,
    on_comment: Option<CommentHandler>,
    on_new_tweet: Option<NewTweetHandler>,
    on_error: Option<ErrorHandler>,
}

impl UpdateHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the `likes` handler
    pub fn on_like(mut self, handler: impl Fn(Vec<LikeDelta>) + Send + Sync + 'static) -> Self {
        self.on_like = Some(Box::new(handler));
        self
    }

    /// Register the `comments` handler
    pub fn on_comment(
        mut self,
        handler: impl Fn(Vec<CommentDelta>) + Send + Sync + 'static,
    ) -> Self {
        self.on_comment = Some(Box::new(handler));
        self
    }

    /// Register the `new_tweet` handler
    pub fn on_new_tweet(mut self, handler: impl Fn(NewTweetDelta) + Send + Sync + 'static) -> Self {
        self.on_new_tweet = Some(Box::new(handler));
        self
    }

    /// Register the error handler (inline publisher errors and the
    /// terminal reconnect failure both arrive here)
    pub fn on_error(mut self, handler: impl Fn(String) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(handler));
        self
    }

    fn like(&self, deltas: Vec<LikeDelta>) {
        if let Some(handler) = &self.on_like {
            handler(deltas);
        }
    }

    fn comment(&self, deltas: Vec<CommentDelta>) {
        if let Some(handler) = &self.on_comment {
            handler(deltas);
        }
    }

    fn new_tweet(&self, delta: NewTweetDelta) {
        if let Some(handler) = &self.on_new_tweet {
            handler(delta);
        }
    }

    fn error(&self, message: impl Into<String>) {
        if let Some(handler) = &self.on_error {
            handler(message.into());
        }
    }
}

/// Extract the data payload of one SSE frame.
///
/// Joins the frame's `data:` lines with newlines; comment lines and other
/// fields (`event:`, `id:`, keep-alive `:` lines) are ignored. Returns
/// `None` for frames with no data at all.
pub fn extract_data(frame: &str) -> Option<String> {
    let mut data_lines: Vec<&str> = Vec::new();
    for line in frame.lines() {
        let line = line.trim_end_matches('\r');
        if let Some(rest) = line.strip_prefix("data:") {
            data_lines.push(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }
    if data_lines.is_empty() {
        None
    } else {
        Some(data_lines.join("\n"))
    }
}

/// Parse one data payload and route it to the matching handler.
///
/// Malformed payloads are logged and dropped without affecting the
/// connection.
pub(crate) fn dispatch(data: &str, handlers: &UpdateHandlers) {
    match serde_json::from_str::<UpdateEvent>(data) {
        Ok(UpdateEvent::Connected { timestamp }) => {
            tracing::info!("Real-time connection established ({})", timestamp);
        }
        Ok(UpdateEvent::Likes { data }) => handlers.like(data),
        Ok(UpdateEvent::Comments { data }) => handlers.comment(data),
        Ok(UpdateEvent::NewTweet { data }) => handlers.new_tweet(data),
        Ok(UpdateEvent::Error { message }) => handlers.error(message),
        Err(e) => {
            tracing::warn!("Dropping malformed update event: {}", e);
        }
    }
}

/// Open the SSE stream, failing on a non-success status
async fn open_stream(client: &Client, url: &str, token: &str) -> Result<reqwest::Response, ClientError> {
    let response = client
        .get(url)
        .bearer_auth(token)
        .header("Accept", "text/event-stream")
        .send()
        .await?
        .error_for_status()?;
    Ok(response)
}

/// Read frames off an open stream until it ends or fails
async fn read_events(
    response: reqwest::Response,
    handlers: &UpdateHandlers,
) -> Result<(), ClientError> {
    let mut stream = response.bytes_stream();
    let mut buffer = String::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        buffer.push_str(&String::from_utf8_lossy(&chunk));

        while let Some(boundary) = buffer.find("\n\n") {
            let frame: String = buffer.drain(..boundary + 2).collect();
            if let Some(data) = extract_data(&frame) {
                dispatch(&data, handlers);
            }
        }
    }

    Ok(())
}

/// The connect/read/backoff loop run by the subscription task
async fn run_subscription(client: Client, url: String, token: String, handlers: Arc<UpdateHandlers>) {
    let mut attempt: u32 = 0;

    loop {
        match open_stream(&client, &url, &token).await {
            Ok(response) => {
                attempt = 0;
                match read_events(response, &handlers).await {
                    Ok(()) => tracing::info!("Real-time stream closed by server"),
                    Err(e) => tracing::warn!("Real-time stream error: {}", e),
                }
            }
            Err(e) => {
                tracing::warn!("Failed to open real-time stream: {}", e);
            }
        }

        if attempt >= MAX_RECONNECT_ATTEMPTS {
            tracing::error!("Real-time reconnect attempts exhausted");
            handlers.error("Failed to maintain real-time connection");
            return;
        }

        let delay = reconnect_delay(attempt);
        attempt += 1;
        tracing::debug!("Reconnecting in {:?} (attempt {})", delay, attempt);
        tokio::time::sleep(delay).await;
    }
}

/// Reconnecting subscription to the server's real-time update stream
///
/// Holds at most one logical subscription. The enabling condition is
/// `enabled && session present`; `connect` is a no-op otherwise and
/// `disconnect` (or drop) fully tears the subscription down.
pub struct UpdateConsumer {
    config: Config,
    enabled: bool,
    handlers: Arc<UpdateHandlers>,
    client: Client,
    task: Option<JoinHandle<()>>,
}

impl UpdateConsumer {
    /// Create a consumer with its handler set. No connection is opened
    /// until [`connect`](Self::connect) is called.
    pub fn new(config: Config, handlers: UpdateHandlers) -> Self {
        Self {
            config,
            enabled: true,
            handlers: Arc::new(handlers),
            client: Client::new(),
            task: None,
        }
    }

    /// Whether a subscription task is currently live
    pub fn is_connected(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Open the subscription. Idempotent: does nothing when disabled,
    /// unauthenticated, or already connected.
    pub fn connect(&mut self) {
        if !self.enabled {
            return;
        }
        let Some(token) = self.config.token().cloned() else {
            return;
        };
        if self.is_connected() {
            return;
        }

        let url = self.config.api_url("/api/tweets/realtime");
        let client = self.client.clone();
        let handlers = Arc::clone(&self.handlers);
        self.task = Some(tokio::spawn(run_subscription(client, url, token, handlers)));
    }

    /// Tear the subscription down. Idempotent; aborting the task cancels
    /// the open connection and any pending reconnect timer together.
    pub fn disconnect(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("Real-time subscription closed");
        }
    }

    /// Enable or disable the consumer, connecting or disconnecting to
    /// match the new condition.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if enabled {
            self.connect();
        } else {
            self.disconnect();
        }
    }

    /// Install or clear the session, reconnecting to match.
    pub fn set_session(&mut self, token: Option<String>, user_id: Option<uuid::Uuid>) {
        self.disconnect();
        match (token, user_id) {
            (Some(token), Some(user_id)) => {
                self.config.set_session(token, user_id);
                self.connect();
            }
            _ => self.config.clear_session(),
        }
    }
}

impl Drop for UpdateConsumer {
    fn drop(&mut self) {
        self.disconnect();
    }
}
