//! Business services containing domain logic and use cases.

pub mod auth;
pub mod events;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, RotationMode, SessionAppResolution};
pub use events::{EventDispatcher, EventPublisher};
pub use password::{BcryptHasher, PasswordHasher};
pub use token::TokenCodec;

#[cfg(any(test, feature = "test-utils"))]
pub use events::RecordingEventPublisher;
