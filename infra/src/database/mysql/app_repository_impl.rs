//! MySQL implementation of the AppRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use sso_core::domain::entities::app::App;
use sso_core::errors::DomainError;
use sso_core::repositories::AppRepository;

use crate::InfrastructureError;

/// MySQL implementation of AppRepository
pub struct MySqlAppRepository {
    pool: MySqlPool,
}

impl MySqlAppRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppRepository for MySqlAppRepository {
    async fn find_by_id(&self, app_id: i32) -> Result<Option<App>, DomainError> {
        let row = sqlx::query("SELECT id, name, secret FROM apps WHERE id = ? LIMIT 1")
            .bind(app_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(InfrastructureError::Database)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let read = |column: &str| -> Result<String, DomainError> {
            row.try_get(column)
                .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", column, e)))
        };

        Ok(Some(App {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?,
            name: read("name")?,
            secret: read("secret")?,
        }))
    }
}
