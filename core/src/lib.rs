//! # SSO Core
//!
//! Token lifecycle domain layer for the SSO backend: credential issuance and
//! verification, single-session refresh rotation, and the interfaces of the
//! directory, session store and event collaborators.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
