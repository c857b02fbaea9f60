//! Password hashing behind a narrow hash/verify interface.

use crate::errors::DomainError;

/// Hash and verify primitives with a fixed work factor
pub trait PasswordHasher: Send + Sync + 'static {
    /// Hash `password`, returning opaque bytes for the directory
    fn hash(&self, password: &str) -> Result<Vec<u8>, DomainError>;

    /// Whether `password` matches `hash`. Malformed hashes never match.
    fn verify(&self, password: &str, hash: &[u8]) -> bool;
}

/// bcrypt-backed hasher
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<Vec<u8>, DomainError> {
        bcrypt::hash(password, self.cost)
            .map(String::into_bytes)
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &[u8]) -> bool {
        std::str::from_utf8(hash)
            .ok()
            .and_then(|hash| bcrypt::verify(password, hash).ok())
            .unwrap_or(false)
    }
}
