/**
 * Update Publisher
 *
 * This module implements the Server-Sent Events handler for the
 * `GET /api/tweets/realtime` endpoint: one long-lived, per-connection stream
 * that polls the store for recent likes and comments and pushes delta
 * events to the client.
 *
 * # Poll Loop
 *
 * On open the stream emits a `connected` event, then every
 * [`POLL_INTERVAL_SECS`] seconds queries the store for likes and comments
 * created within the last [`LOOKBACK_WINDOW_SECS`] seconds. The window is
 * deliberately wider than the tick so that poll jitter cannot open gaps;
 * the cost is that a row can appear in two consecutive windows, which is
 * why clients must merge deltas idempotently.
 *
 * # Connection Management
 *
 * The poll loop lives inside the response stream itself; each connection
 * owns an independent interval timer, so a slow query on one connection
 * never stalls another. When the client disconnects, Axum drops the stream
 * and the timer with it; no polling loop can outlive its connection.
 *
 * # Errors
 *
 * A failed store query is reported as an `error` event on the stream and
 * polling continues; only transport-level failure ends the stream.
 */
use crate::backend::middleware::auth::AuthUser;
use crate::backend::realtime::queries::{find_comments_since, find_likes_since};
use crate::shared::{CommentDelta, LikeDelta, UpdateEvent};
use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
};
use chrono::{DateTime, Utc};
use futures_util::stream;
#[cfg(feature = "ssr")]
use sqlx::PgPool;
use std::collections::VecDeque;
use tokio::time::MissedTickBehavior;

/// Seconds between poll ticks
pub const POLL_INTERVAL_SECS: u64 = 2;

/// Seconds of lookback per poll tick; wider than the tick interval so
/// jitter cannot open gaps
pub const LOOKBACK_WINDOW_SECS: i64 = 5;

/// The start of the poll window for a tick occurring at `now`
pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - chrono::Duration::seconds(LOOKBACK_WINDOW_SECS)
}

/// Assemble the events for one poll tick.
///
/// Empty result sets produce no event; at most one `likes` and one
/// `comments` event are emitted per tick, in that order, each carrying the
/// deltas in store order.
pub fn tick_events(likes: Vec<LikeDelta>, comments: Vec<CommentDelta>) -> Vec<UpdateEvent> {
    let mut events = Vec::with_capacity(2);
    if !likes.is_empty() {
        events.push(UpdateEvent::likes(likes));
    }
    if !comments.is_empty() {
        events.push(UpdateEvent::comments(comments));
    }
    events
}

/// Run the window queries for one tick and assemble the resulting events
#[cfg(feature = "ssr")]
async fn poll_tick(pool: &PgPool, since: DateTime<Utc>) -> Result<Vec<UpdateEvent>, sqlx::Error> {
    let likes = find_likes_since(pool, since)
        .await?
        .into_iter()
        .map(LikeDelta::from)
        .collect();
    let comments = find_comments_since(pool, since)
        .await?
        .into_iter()
        .map(CommentDelta::from)
        .collect();
    Ok(tick_events(likes, comments))
}

/// Handle a realtime subscription (GET /api/tweets/realtime)
///
/// Requires authentication: the route is behind the auth middleware, so an
/// unauthenticated caller is rejected with 401 before any stream is opened.
///
/// # Returns
///
/// A Server-Sent Events stream of [`UpdateEvent`] frames. Each frame is a
/// `data:` line holding the JSON-encoded event; Axum's keep-alive injects
/// comment lines to hold the connection open between events.
///
/// # Errors
///
/// * `401 Unauthorized` - No valid session (rejected by the middleware)
/// * `503 Service Unavailable` - Database not configured
#[cfg(feature = "ssr")]
pub async fn handle_realtime_subscription(
    AuthUser(user): AuthUser,
    State(pool): State<Option<PgPool>>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, axum::Error>>>, StatusCode> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("[Realtime] Database not configured");
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    tracing::info!("[Realtime] Subscription opened for {}", user.username);

    // The connected event goes out before the first poll
    let mut pending: VecDeque<UpdateEvent> = VecDeque::new();
    pending.push_back(UpdateEvent::connected(Utc::now().to_rfc3339()));

    let mut interval = tokio::time::interval(std::time::Duration::from_secs(POLL_INTERVAL_SECS));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The poll loop is the stream: drain pending events, then tick and
    // refill. Dropping the stream on disconnect cancels the interval.
    let stream = stream::unfold(
        (pool, interval, pending),
        move |(pool, mut interval, mut pending)| async move {
            loop {
                if let Some(event) = pending.pop_front() {
                    let payload = match serde_json::to_string(&event) {
                        Ok(payload) => payload,
                        Err(e) => {
                            tracing::error!("[Realtime] Failed to serialize event: {:?}", e);
                            continue;
                        }
                    };
                    tracing::debug!("[Realtime] Emitting {} event", event.kind());
                    return Some((Ok(Event::default().data(payload)), (pool, interval, pending)));
                }

                interval.tick().await;
                let since = window_start(Utc::now());
                match poll_tick(&pool, since).await {
                    Ok(events) => pending.extend(events),
                    Err(e) => {
                        tracing::error!("[Realtime] Poll failed: {:?}", e);
                        pending.push_back(UpdateEvent::error("Update check failed"));
                    }
                }
            }
        },
    );

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
