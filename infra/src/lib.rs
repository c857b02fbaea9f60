//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborator interfaces defined in
//! `sso_core`:
//! - **Database**: MySQL user and app directory using SQLx
//! - **Cache**: Redis client and the single-slot refresh token store
//! - **Events**: Redis stream and log-based user event publishers

use sso_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and session store
pub mod cache;

/// Events module - user event publishers
pub mod events;

pub use cache::{RedisClient, RedisSessionStore};
pub use database::{DatabasePool, MySqlAppRepository, MySqlUserRepository};
pub use events::{RedisStreamPublisher, TracingEventPublisher};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Payload encoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            // Redis is only used for session and event storage; any failure
            // there means the store is unavailable
            InfrastructureError::Cache(e) => DomainError::transient(e.to_string()),
            InfrastructureError::Database(e) if is_connectivity_error(&e) => {
                DomainError::transient(e.to_string())
            }
            other => DomainError::internal(other.to_string()),
        }
    }
}

/// Errors meaning the database could not be reached rather than that a
/// statement was rejected
pub(crate) fn is_connectivity_error(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    )
}
