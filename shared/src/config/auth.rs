//! Credential issuance and session configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Token lifetimes, hashing cost and session handling settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Access token lifetime in seconds
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_secs: u64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_secs: u64,

    /// bcrypt work factor used for new password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Deadline for a single session store or directory call, in milliseconds
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,

    /// Which tenant's secret verifies tokens on refresh and logout
    #[serde(default)]
    pub session_app: SessionAppResolution,

    /// How refresh consumes the stored token
    #[serde(default)]
    pub rotation: RotationMode,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_ttl_secs: default_access_ttl(),
            refresh_token_ttl_secs: default_refresh_ttl(),
            bcrypt_cost: default_bcrypt_cost(),
            store_timeout_ms: default_store_timeout_ms(),
            session_app: SessionAppResolution::default(),
            rotation: RotationMode::default(),
        }
    }
}

impl AuthConfig {
    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_ttl_secs)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_ttl_secs)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// Set both token lifetimes
    pub fn with_ttls(mut self, access: Duration, refresh: Duration) -> Self {
        self.access_token_ttl_secs = access.as_secs();
        self.refresh_token_ttl_secs = refresh.as_secs();
        self
    }

    /// Set the session app resolution strategy
    pub fn with_session_app(mut self, session_app: SessionAppResolution) -> Self {
        self.session_app = session_app;
        self
    }

    /// Set the refresh rotation mode
    pub fn with_rotation(mut self, rotation: RotationMode) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Selects the tenant whose secret verifies a presented token.
///
/// `Fixed` uses one configured app for every refresh and logout call.
/// `FromClaims` reads the unverified `app_id` claim, loads that app and then
/// performs full verification with its secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SessionAppResolution {
    Fixed { app_id: i32 },
    FromClaims,
}

impl Default for SessionAppResolution {
    fn default() -> Self {
        SessionAppResolution::Fixed { app_id: 1 }
    }
}

/// Refresh rotation strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    /// Get, compare, then delete as separate store calls.
    /// Two concurrent refreshes carrying the same token may both succeed.
    #[default]
    ReadCompareDelete,
    /// Compare and delete in one atomic store operation.
    /// At most one concurrent refresh per token succeeds.
    AtomicTake,
}

fn default_access_ttl() -> u64 {
    900 // 15 minutes
}

fn default_refresh_ttl() -> u64 {
    604_800 // 7 days
}

fn default_bcrypt_cost() -> u32 {
    10
}

fn default_store_timeout_ms() -> u64 {
    3_000
}
