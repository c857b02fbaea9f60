//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    admins: Arc<RwLock<HashSet<i64>>>,
    next_id: AtomicI64,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            admins: Arc::new(RwLock::new(HashSet::new())),
            next_id: AtomicI64::new(1),
        }
    }

    /// Grant the admin flag to an existing user
    pub async fn set_admin(&self, id: i64) {
        self.admins.write().await.insert(id);
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn save_user(&self, email: &str, pass_hash: &[u8]) -> Result<i64, DomainError> {
        let mut users = self.users.write().await;

        // Unique email, mirroring the directory's constraint
        if users.values().any(|u| u.email == email) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        users.insert(id, User::new(id, email, pass_hash.to_vec()));
        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn is_admin(&self, id: i64) -> Result<Option<bool>, DomainError> {
        if !self.users.read().await.contains_key(&id) {
            return Ok(None);
        }
        Ok(Some(self.admins.read().await.contains(&id)))
    }
}
