//! User repository trait defining the credential directory interface.
//!
//! The directory owns user identity and enforces email uniqueness. The core
//! only reacts to the conflict it reports.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    ///
    /// # Arguments
    /// * `email` - Unique email address
    /// * `pass_hash` - Opaque password hash bytes
    ///
    /// # Returns
    /// * `Ok(i64)` - Id assigned by the directory
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email already registered
    /// * `Err(DomainError)` - Directory unreachable or other failure
    async fn save_user(&self, email: &str, pass_hash: &[u8]) -> Result<i64, DomainError>;

    /// Find a user by email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with this email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Admin flag for a user, `Ok(None)` when the user does not exist
    async fn is_admin(&self, id: i64) -> Result<Option<bool>, DomainError>;
}
