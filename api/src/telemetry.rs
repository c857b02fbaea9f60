//! Tracing subscriber setup

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sso_shared::config::{Environment, LogFormat, LoggingConfig};

/// Build the filter from `RUST_LOG`, falling back to the configured level
pub fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
}

/// Install the global subscriber. Call once at startup.
pub fn init(logging: &LoggingConfig, environment: Environment) {
    let filter = env_filter(logging);

    match logging.resolved_format(environment) {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(true))
            .init(),
    }
}
