//! Shared configuration records and error response structures for the SSO server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and the layered loader
//! - Error response structures and error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, Environment, EventSink, EventsConfig,
    LogFormat, LoggingConfig, RotationMode, ServerConfig, SessionAppResolution,
};
pub use errors::{error_codes, ErrorResponse};
