//! Redis Streams publisher
//!
//! Each event becomes one stream entry with the partition key, the event
//! type and the JSON payload. The stream is trimmed approximately to keep
//! memory bounded.

use async_trait::async_trait;
use tracing::debug;

use sso_core::domain::UserEvent;
use sso_core::errors::DomainError;
use sso_core::services::EventPublisher;

use crate::cache::RedisClient;
use crate::InfrastructureError;

pub struct RedisStreamPublisher {
    client: RedisClient,
    stream_key: String,
    max_len: usize,
}

impl RedisStreamPublisher {
    pub fn new(client: RedisClient, stream_key: impl Into<String>, max_len: usize) -> Self {
        Self {
            client,
            stream_key: stream_key.into(),
            max_len,
        }
    }
}

pub(crate) fn stream_fields(
    key: &str,
    event: &UserEvent,
) -> Result<Vec<(&'static str, String)>, InfrastructureError> {
    Ok(vec![
        ("key", key.to_string()),
        ("type", event.event_type.as_str().to_string()),
        ("payload", serde_json::to_string(event)?),
    ])
}

#[async_trait]
impl EventPublisher for RedisStreamPublisher {
    async fn publish(&self, key: &str, event: &UserEvent) -> Result<(), DomainError> {
        let fields = stream_fields(key, event)?;
        let id = self
            .client
            .xadd_capped(&self.stream_key, self.max_len, &fields)
            .await?;

        debug!(
            stream = %self.stream_key,
            entry_id = %id,
            event_type = %event.event_type,
            "Event appended to stream"
        );
        Ok(())
    }
}
