//! Log-only event sink
//!
//! Used when no broker is configured. Every event is written as a
//! structured `info` record on the `sso::events` target.

use async_trait::async_trait;

use sso_core::domain::UserEvent;
use sso_core::errors::DomainError;
use sso_core::services::EventPublisher;

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, key: &str, event: &UserEvent) -> Result<(), DomainError> {
        tracing::info!(
            target: "sso::events",
            key,
            event_type = %event.event_type,
            user_id = event.user_id,
            email = %event.email,
            ip = event.ip.as_deref().unwrap_or(""),
            timestamp = %event.timestamp,
            "User event"
        );
        Ok(())
    }
}
