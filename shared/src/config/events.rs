//! User event publishing configuration

use serde::{Deserialize, Serialize};

/// Event dispatcher and stream settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventsConfig {
    /// Publish user events at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Where events go
    #[serde(default)]
    pub sink: EventSink,

    /// Redis stream receiving user events
    #[serde(default = "default_stream_key")]
    pub stream_key: String,

    /// Pending events held before new ones are dropped
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Approximate cap on stream length (XADD MAXLEN ~)
    #[serde(default = "default_max_stream_len")]
    pub max_stream_len: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            sink: EventSink::default(),
            stream_key: default_stream_key(),
            queue_capacity: default_queue_capacity(),
            max_stream_len: default_max_stream_len(),
        }
    }
}

/// Event destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSink {
    /// Append to a Redis stream
    #[default]
    Redis,
    /// Write each event to the application log
    Log,
}

fn default_enabled() -> bool {
    true
}

fn default_stream_key() -> String {
    String::from("sso.user-events")
}

fn default_queue_capacity() -> usize {
    1024
}

fn default_max_stream_len() -> usize {
    100_000
}
