//! Best-effort user event delivery
//!
//! The auth service hands events to an [`EventDispatcher`], which queues them
//! on a bounded channel drained by a single worker task. Publish failures and
//! queue overflow are logged and never reach the caller.

mod dispatcher;
mod publisher;

#[cfg(test)]
mod tests;

pub use dispatcher::EventDispatcher;
pub use publisher::EventPublisher;

#[cfg(any(test, feature = "test-utils"))]
pub use publisher::RecordingEventPublisher;
