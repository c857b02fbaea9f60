//! Redis-backed session store and event stream against a live server.
//!
//! Run with `REDIS_URL=redis://localhost:6379 cargo test -p sso_infra -- --ignored`.

use std::time::Duration;

use sso_core::domain::{EventType, UserEvent};
use sso_core::repositories::SessionStore;
use sso_core::services::EventPublisher;
use sso_infra::{RedisClient, RedisSessionStore, RedisStreamPublisher};
use sso_shared::config::CacheConfig;

async fn client() -> RedisClient {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    RedisClient::new(&CacheConfig::new(url))
        .await
        .expect("redis must be reachable for ignored tests")
}

fn store(client: RedisClient) -> RedisSessionStore {
    RedisSessionStore::new(client, Some(format!("sso-test-{}", std::process::id())))
}

#[tokio::test]
#[ignore]
async fn test_session_slot_roundtrip() {
    let store = store(client().await);

    store
        .save_token(1, "first", Duration::from_secs(60))
        .await
        .unwrap();
    store
        .save_token(1, "second", Duration::from_secs(60))
        .await
        .unwrap();
    assert_eq!(store.get_token(1).await.unwrap().as_deref(), Some("second"));

    store.delete_token(1).await.unwrap();
    assert_eq!(store.get_token(1).await.unwrap(), None);
    // Deleting a missing slot is not an error
    store.delete_token(1).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_take_token_only_on_match() {
    let store = store(client().await);
    store
        .save_token(2, "current", Duration::from_secs(60))
        .await
        .unwrap();

    assert!(!store.take_token_if_matches(2, "stale").await.unwrap());
    assert!(store.take_token_if_matches(2, "current").await.unwrap());
    assert!(!store.take_token_if_matches(2, "current").await.unwrap());
    assert_eq!(store.get_token(2).await.unwrap(), None);
}

#[tokio::test]
#[ignore]
async fn test_slot_expires_with_ttl() {
    let store = store(client().await);
    store
        .save_token(3, "short", Duration::from_secs(1))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(store.get_token(3).await.unwrap(), None);
}

#[tokio::test]
#[ignore]
async fn test_zero_ttl_clears_slot() {
    let store = store(client().await);
    store
        .save_token(4, "live", Duration::from_secs(60))
        .await
        .unwrap();
    store.save_token(4, "dead", Duration::ZERO).await.unwrap();

    assert_eq!(store.get_token(4).await.unwrap(), None);
}

#[tokio::test]
#[ignore]
async fn test_stream_publisher_appends_entries() {
    let client = client().await;
    let stream = format!("sso-test-events-{}", std::process::id());
    let publisher = RedisStreamPublisher::new(client.clone(), stream.clone(), 1000);
    let event = UserEvent::new(EventType::Registered, 9, "grace@example.com", None);

    publisher.publish(&event.partition_key(), &event).await.unwrap();

    assert!(client.delete(&stream).await.unwrap());
}
