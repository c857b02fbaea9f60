//! Session store interface.
//!
//! The store holds at most one refresh token per user id. Writing a new token
//! replaces the previous one, which is what makes a second login invalidate
//! the first session.

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::DomainError;

/// Single-slot refresh token storage keyed by user id
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store `token` for `user_id`, overwriting any previous value
    ///
    /// # Arguments
    /// * `user_id` - Owner of the session
    /// * `token` - Refresh token string
    /// * `ttl` - Time to live, a zero ttl leaves no entry behind
    async fn save_token(&self, user_id: i64, token: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Currently stored token, `Ok(None)` when absent or expired
    async fn get_token(&self, user_id: i64) -> Result<Option<String>, DomainError>;

    /// Remove the stored token. Removing a missing entry succeeds.
    async fn delete_token(&self, user_id: i64) -> Result<(), DomainError>;

    /// Atomically remove the stored token if it equals `token`
    ///
    /// # Returns
    /// * `Ok(true)` - The token matched and was removed
    /// * `Ok(false)` - No entry, or a different token is stored
    async fn take_token_if_matches(&self, user_id: i64, token: &str) -> Result<bool, DomainError>;
}
