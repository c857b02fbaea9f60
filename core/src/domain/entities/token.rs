//! Credential claim sets and token pairs.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use super::app::App;
use super::user::User;

/// Claims structure for the signed payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub uid: i64,

    /// User email
    pub email: String,

    /// Expiration timestamp (Unix seconds)
    pub exp: i64,

    /// Tenant that signed the token
    pub app_id: i32,

    /// Issued at timestamp
    pub iat: i64,

    /// Unique token id, keeps tokens minted in the same second distinct
    pub jti: String,
}

impl Claims {
    /// Creates claims for `user` under `app`, expiring `ttl` from now
    pub fn new(user: &User, app: &App, ttl: Duration) -> Self {
        let now = Utc::now().timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

        Self {
            uid: user.id,
            email: user.email.clone(),
            exp: now.saturating_add(ttl_secs),
            app_id: app.id,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Identity recovered from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedUser {
    pub user_id: i64,
    pub email: String,
}

/// Access and refresh token pair returned by login and refresh
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}
