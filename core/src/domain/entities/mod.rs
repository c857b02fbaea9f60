//! Domain entities representing core business objects.

pub mod app;
pub mod event;
pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use app::App;
pub use event::{EventType, UserEvent};
pub use token::{Claims, TokenPair, VerifiedUser};
pub use user::User;
