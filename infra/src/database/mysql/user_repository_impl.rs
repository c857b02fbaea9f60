//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use sso_core::domain::entities::user::User;
use sso_core::errors::{AuthError, DomainError};
use sso_core::repositories::UserRepository;

use crate::InfrastructureError;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        Ok(User {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::internal(format!("Failed to get email: {}", e)))?,
            pass_hash: row
                .try_get("pass_hash")
                .map_err(|e| DomainError::internal(format!("Failed to get pass_hash: {}", e)))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn save_user(&self, email: &str, pass_hash: &[u8]) -> Result<i64, DomainError> {
        let result = sqlx::query("INSERT INTO users (email, pass_hash) VALUES (?, ?)")
            .bind(email)
            .bind(pass_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    DomainError::Auth(AuthError::UserAlreadyExists)
                }
                other => InfrastructureError::Database(other).into(),
            })?;

        i64::try_from(result.last_insert_id())
            .map_err(|_| DomainError::internal("Inserted user id out of range"))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("SELECT id, email, pass_hash FROM users WHERE email = ? LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(InfrastructureError::Database)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("SELECT id, email, pass_hash FROM users WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(InfrastructureError::Database)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn is_admin(&self, id: i64) -> Result<Option<bool>, DomainError> {
        let row = sqlx::query("SELECT is_admin FROM users WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(InfrastructureError::Database)?;

        row.map(|row| {
            row.try_get::<bool, _>("is_admin")
                .map_err(|e| DomainError::internal(format!("Failed to get is_admin: {}", e)))
        })
        .transpose()
    }
}
