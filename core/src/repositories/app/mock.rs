//! Mock implementation of AppRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::app::App;
use crate::errors::DomainError;

use super::trait_::AppRepository;

/// Mock app repository for testing
pub struct MockAppRepository {
    apps: Arc<RwLock<HashMap<i32, App>>>,
}

impl MockAppRepository {
    pub fn new() -> Self {
        Self {
            apps: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Build a repository pre-populated with `apps`
    pub fn with_apps(apps: impl IntoIterator<Item = App>) -> Self {
        let apps = apps.into_iter().map(|a| (a.id, a)).collect();
        Self {
            apps: Arc::new(RwLock::new(apps)),
        }
    }

    /// Insert or replace an app
    pub async fn insert(&self, app: App) {
        self.apps.write().await.insert(app.id, app);
    }
}

impl Default for MockAppRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppRepository for MockAppRepository {
    async fn find_by_id(&self, app_id: i32) -> Result<Option<App>, DomainError> {
        Ok(self.apps.read().await.get(&app_id).cloned())
    }
}
