//! In-memory SessionStore honouring TTLs on the tokio clock

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::errors::DomainError;

use super::trait_::SessionStore;

/// Mock session store for testing
#[derive(Clone, Default)]
pub struct MockSessionStore {
    entries: Arc<Mutex<HashMap<i64, (String, Instant)>>>,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .await
            .values()
            .filter(|(_, expires_at)| *expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn save_token(&self, user_id: i64, token: &str, ttl: Duration) -> Result<(), DomainError> {
        let mut entries = self.entries.lock().await;
        if ttl.is_zero() {
            entries.remove(&user_id);
            return Ok(());
        }
        entries.insert(user_id, (token.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn get_token(&self, user_id: i64) -> Result<Option<String>, DomainError> {
        let mut entries = self.entries.lock().await;
        match entries.get(&user_id) {
            Some((token, expires_at)) if *expires_at > Instant::now() => Ok(Some(token.clone())),
            Some(_) => {
                entries.remove(&user_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete_token(&self, user_id: i64) -> Result<(), DomainError> {
        self.entries.lock().await.remove(&user_id);
        Ok(())
    }

    async fn take_token_if_matches(&self, user_id: i64, token: &str) -> Result<bool, DomainError> {
        let mut entries = self.entries.lock().await;
        let matches = match entries.get(&user_id) {
            Some((stored, expires_at)) => {
                *expires_at > Instant::now() && constant_time_eq(stored.as_bytes(), token.as_bytes())
            }
            None => false,
        };
        if matches {
            entries.remove(&user_id);
        }
        Ok(matches)
    }
}
