use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::entities::event::UserEvent;

use super::publisher::EventPublisher;

/// Handle for queueing user events. Cheap to clone.
///
/// When the queue is full the newest event is dropped and counted.
#[derive(Clone)]
pub struct EventDispatcher {
    tx: mpsc::Sender<UserEvent>,
    dropped: Arc<AtomicU64>,
}

impl EventDispatcher {
    /// Spawn the worker draining a queue of `capacity` events into `publisher`.
    ///
    /// The worker stops once every dispatcher clone is dropped and the queue
    /// is empty; await the returned handle to flush on shutdown.
    pub fn spawn(publisher: Arc<dyn EventPublisher>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let worker = EventWorker { publisher, rx };
        let handle = tokio::spawn(worker.run());
        info!(capacity, "Event dispatcher spawned");

        let dispatcher = Self {
            tx,
            dropped: Arc::new(AtomicU64::new(0)),
        };
        (dispatcher, handle)
    }

    /// Queue `event` without waiting
    pub fn dispatch(&self, event: UserEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                warn!(
                    event_type = %event.event_type,
                    user_id = event.user_id,
                    dropped,
                    "Event queue full, dropping event"
                );
            }
            Err(TrySendError::Closed(event)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(
                    event_type = %event.event_type,
                    user_id = event.user_id,
                    "Event worker stopped, dropping event"
                );
            }
        }
    }

    /// Events discarded since startup
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

struct EventWorker {
    publisher: Arc<dyn EventPublisher>,
    rx: mpsc::Receiver<UserEvent>,
}

impl EventWorker {
    async fn run(mut self) {
        while let Some(event) = self.rx.recv().await {
            let key = event.partition_key();
            match self.publisher.publish(&key, &event).await {
                Ok(()) => debug!(event_type = %event.event_type, user_id = event.user_id, "Event published"),
                Err(e) => warn!(
                    event_type = %event.event_type,
                    user_id = event.user_id,
                    error = %e,
                    "Failed to publish event"
                ),
            }
        }
        info!("Event dispatcher stopped");
    }
}
