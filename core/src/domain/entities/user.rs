//! User entity as stored in the credential directory.

use serde::{Deserialize, Serialize};

/// A registered user
///
/// The password hash is opaque bytes produced by the password hasher and is
/// never serialized.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Directory-assigned identifier
    pub id: i64,

    /// Unique email address
    pub email: String,

    #[serde(skip)]
    pub pass_hash: Vec<u8>,
}

impl User {
    pub fn new(id: i64, email: impl Into<String>, pass_hash: Vec<u8>) -> Self {
        Self {
            id,
            email: email.into(),
            pass_hash,
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("pass_hash", &"<redacted>")
            .finish()
    }
}
