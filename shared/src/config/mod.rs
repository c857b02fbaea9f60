//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token lifetimes, hashing cost, session app and rotation settings
//! - `cache` - Redis configuration for the refresh token store
//! - `database` - MySQL connection pool configuration
//! - `environment` - environment detection and logging configuration
//! - `events` - user event stream and dispatcher settings
//! - `server` - HTTP server configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod events;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, RotationMode, SessionAppResolution};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use events::{EventSink, EventsConfig};
pub use server::ServerConfig;

/// Environment variable prefix for overrides, e.g. `SSO__AUTH__ACCESS_TOKEN_TTL_SECS`
pub const ENV_PREFIX: &str = "SSO";

/// Optional config file location
pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Redis configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Event publishing configuration
    #[serde(default)]
    pub events: EventsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration in layers: built-in defaults, then the optional file
    /// named by `CONFIG_PATH`, then `SSO__`-prefixed environment variables.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR).ok();
        Self::load_from(path.as_deref())
    }

    /// Load configuration with an explicit optional file path
    pub fn load_from(path: Option<&str>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder()
            .add_source(::config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(::config::File::with_name(path).required(false));
        }

        builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
