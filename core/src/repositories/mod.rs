pub mod app;
pub mod session;
pub mod user;

pub use app::AppRepository;
pub use session::SessionStore;
pub use user::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use app::MockAppRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use session::MockSessionStore;
#[cfg(any(test, feature = "test-utils"))]
pub use user::MockUserRepository;
