//! Configuration for the authentication service

use std::time::Duration;

use sso_shared::config::AuthConfig;

pub use sso_shared::config::{RotationMode, SessionAppResolution};

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime, also the session store TTL
    pub refresh_token_ttl: Duration,
    /// Deadline applied to every directory and session store call
    pub store_timeout: Duration,
    /// Tenant used to verify tokens on refresh and logout
    pub session_app: SessionAppResolution,
    /// Refresh rotation strategy
    pub rotation: RotationMode,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            access_token_ttl: config.access_token_ttl(),
            refresh_token_ttl: config.refresh_token_ttl(),
            store_timeout: config.store_timeout(),
            session_app: config.session_app,
            rotation: config.rotation,
        }
    }
}
