use async_trait::async_trait;

use crate::domain::entities::event::UserEvent;
use crate::errors::DomainError;

/// Sink for user events
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish `event` under partition `key`
    async fn publish(&self, key: &str, event: &UserEvent) -> Result<(), DomainError>;
}

#[cfg(any(test, feature = "test-utils"))]
pub use recording::RecordingEventPublisher;

#[cfg(any(test, feature = "test-utils"))]
mod recording {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    /// Publisher that keeps every event in memory, optionally failing instead
    #[derive(Clone, Default)]
    pub struct RecordingEventPublisher {
        events: Arc<Mutex<Vec<(String, UserEvent)>>>,
        fail: Arc<AtomicBool>,
    }

    impl RecordingEventPublisher {
        pub fn new() -> Self {
            Self::default()
        }

        /// A publisher whose every call returns an error
        pub fn failing() -> Self {
            let publisher = Self::default();
            publisher.fail.store(true, Ordering::SeqCst);
            publisher
        }

        pub fn events(&self) -> Vec<(String, UserEvent)> {
            self.events.lock().map(|e| e.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl EventPublisher for RecordingEventPublisher {
        async fn publish(&self, key: &str, event: &UserEvent) -> Result<(), DomainError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(DomainError::transient("event sink unavailable"));
            }
            if let Ok(mut events) = self.events.lock() {
                events.push((key.to_string(), event.clone()));
            }
            Ok(())
        }
    }
}
