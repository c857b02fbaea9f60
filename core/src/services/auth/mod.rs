//! Authentication service module
//!
//! Registration, login, refresh rotation, logout and the admin check, composed
//! from the credential directory, the session store, the token codec and the
//! event dispatcher.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::{AuthServiceConfig, RotationMode, SessionAppResolution};
pub use service::AuthService;
