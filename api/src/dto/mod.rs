//! Request and response bodies

pub mod auth;
pub mod error;

pub use auth::*;
pub use error::{validation_error_response, ErrorResponseExt};
