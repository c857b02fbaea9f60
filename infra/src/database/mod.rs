//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management
//! - User and app directory implementations

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{MySqlAppRepository, MySqlUserRepository};
