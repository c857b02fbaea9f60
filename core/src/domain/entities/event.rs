//! User lifecycle events published to the downstream analytics pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of user event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "user.registered")]
    Registered,
    #[serde(rename = "user.logged_in")]
    LoggedIn,
    #[serde(rename = "user.logged_out")]
    LoggedOut,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Registered => "user.registered",
            EventType::LoggedIn => "user.logged_in",
            EventType::LoggedOut => "user.logged_out",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event payload, serialized as `{type, user_id, email, ip, timestamp}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub user_id: i64,
    pub email: String,
    pub ip: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl UserEvent {
    pub fn new(event_type: EventType, user_id: i64, email: impl Into<String>, ip: Option<String>) -> Self {
        Self {
            event_type,
            user_id,
            email: email.into(),
            ip,
            timestamp: Utc::now(),
        }
    }

    /// Events for the same user share a partition key
    pub fn partition_key(&self) -> String {
        self.user_id.to_string()
    }
}
