//! Tenant directory interface.

use async_trait::async_trait;

use crate::domain::entities::app::App;
use crate::errors::DomainError;

/// Read-only access to tenant records and their signing secrets
#[async_trait]
pub trait AppRepository: Send + Sync {
    /// Find an app by id, `Ok(None)` when unknown
    async fn find_by_id(&self, app_id: i32) -> Result<Option<App>, DomainError>;
}
