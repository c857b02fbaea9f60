//! Redis-backed refresh token store
//!
//! One key per user, `user_token:<id>`, optionally namespaced by the
//! configured prefix. The key's TTL is the refresh token lifetime.

use async_trait::async_trait;
use std::time::Duration;

use sso_core::errors::DomainError;
use sso_core::repositories::SessionStore;

use super::redis_client::RedisClient;

const KEY_NAMESPACE: &str = "user_token";

/// Session store keeping one refresh token per user in Redis
#[derive(Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
    key_prefix: Option<String>,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient, key_prefix: Option<String>) -> Self {
        Self { client, key_prefix }
    }

    fn key(&self, user_id: i64) -> String {
        session_key(self.key_prefix.as_deref(), user_id)
    }
}

pub(crate) fn session_key(prefix: Option<&str>, user_id: i64) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}:{}", prefix, KEY_NAMESPACE, user_id),
        _ => format!("{}:{}", KEY_NAMESPACE, user_id),
    }
}

/// Whole seconds for SET EX, rounding sub-second remainders up
pub(crate) fn expiry_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs();
    if ttl.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn save_token(&self, user_id: i64, token: &str, ttl: Duration) -> Result<(), DomainError> {
        let key = self.key(user_id);
        // Redis rejects SET EX 0; an already-expired session is no session
        if ttl.is_zero() {
            self.client.delete(&key).await?;
            return Ok(());
        }
        self.client
            .set_with_expiry(&key, token, expiry_seconds(ttl))
            .await?;
        Ok(())
    }

    async fn get_token(&self, user_id: i64) -> Result<Option<String>, DomainError> {
        Ok(self.client.get(&self.key(user_id)).await?)
    }

    async fn delete_token(&self, user_id: i64) -> Result<(), DomainError> {
        self.client.delete(&self.key(user_id)).await?;
        Ok(())
    }

    async fn take_token_if_matches(&self, user_id: i64, token: &str) -> Result<bool, DomainError> {
        Ok(self
            .client
            .compare_and_delete(&self.key(user_id), token)
            .await?)
    }
}
