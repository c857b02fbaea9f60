//! Event sinks for user lifecycle events

pub mod redis_stream;
pub mod tracing_publisher;

#[cfg(test)]
mod tests;

pub use redis_stream::RedisStreamPublisher;
pub use tracing_publisher::TracingEventPublisher;
