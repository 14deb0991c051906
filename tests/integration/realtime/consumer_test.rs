//! Update Consumer reconnect and cancellation tests
//!
//! These tests run the consumer against a local TCP listener that accepts
//! and immediately drops every connection, so every subscription attempt
//! fails at the transport level and the reconnect path is exercised for
//! real.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;
use warbler::client::{Config, UpdateConsumer, UpdateHandlers, MAX_RECONNECT_ATTEMPTS};

/// Bind a listener that accepts connections and drops them immediately,
/// returning its address and an accept counter.
async fn spawn_dropping_server() -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let accepts = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&accepts);
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    counter.fetch_add(1, Ordering::SeqCst);
                    drop(socket);
                }
                Err(_) => break,
            }
        }
    });

    (addr, accepts)
}

fn consumer_for(addr: SocketAddr, handlers: UpdateHandlers) -> UpdateConsumer {
    let mut config = Config::with_server_url(format!("http://{addr}"));
    config.set_session("test-token".to_string(), Uuid::new_v4());
    UpdateConsumer::new(config, handlers)
}

#[tokio::test]
async fn test_disconnect_during_backoff_prevents_reconnect() {
    let (addr, accepts) = spawn_dropping_server().await;
    let mut consumer = consumer_for(addr, UpdateHandlers::new());
    consumer.connect();

    // Wait for the first (failing) attempt to land
    for _ in 0..200 {
        if accepts.load(Ordering::SeqCst) >= 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(accepts.load(Ordering::SeqCst), 1, "first attempt expected");

    // The first backoff is 1s; disconnect while that timer is pending
    consumer.disconnect();
    assert!(!consumer.is_connected());

    // Well past where the reconnect would have fired
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(
        accepts.load(Ordering::SeqCst),
        1,
        "no connection may be opened after disconnect"
    );
}

#[tokio::test(start_paused = true)]
async fn test_terminal_error_after_exhausted_reconnects() {
    let (addr, accepts) = spawn_dropping_server().await;

    let errors: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&errors);
    let handlers = UpdateHandlers::new().on_error(move |message| {
        sink.lock().unwrap().push(message);
    });

    let mut consumer = consumer_for(addr, handlers);
    consumer.connect();

    // The backoff schedule is 1+2+4+8+16 = 31s of (paused) time
    for _ in 0..20_000 {
        if !errors.lock().unwrap().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    // Let the subscription task wind down after reporting
    tokio::time::sleep(Duration::from_millis(100)).await;

    let errors = errors.lock().unwrap();
    assert_eq!(
        errors.as_slice(),
        ["Failed to maintain real-time connection"],
        "exactly one terminal error is reported"
    );
    // Initial attempt + MAX_RECONNECT_ATTEMPTS retries, then no more
    assert_eq!(
        accepts.load(Ordering::SeqCst),
        1 + MAX_RECONNECT_ATTEMPTS as usize
    );
    assert!(!consumer.is_connected(), "subscription task has stopped");
}

#[tokio::test]
async fn test_connect_is_idempotent_while_live() {
    let (addr, _accepts) = spawn_dropping_server().await;
    let mut consumer = consumer_for(addr, UpdateHandlers::new());

    consumer.connect();
    assert!(consumer.is_connected());
    // A second connect while a subscription task is live is a no-op
    consumer.connect();
    assert!(consumer.is_connected());

    consumer.disconnect();
}
