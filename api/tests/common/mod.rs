//! Shared fixtures for HTTP tests
#![allow(dead_code)]

use actix_web::web;
use std::sync::Arc;

use sso_api::routes::AppState;
use sso_core::domain::App;
use sso_core::repositories::{MockAppRepository, MockSessionStore, MockUserRepository};
use sso_core::services::{AuthService, AuthServiceConfig, BcryptHasher};

pub const APP_ID: i32 = 1;
pub const PARTNER_APP_ID: i32 = 2;
pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "secret1";

pub type TestState = AppState<MockUserRepository, MockAppRepository, MockSessionStore>;

pub struct TestFixture {
    pub state: web::Data<TestState>,
    pub users: Arc<MockUserRepository>,
    pub store: Arc<MockSessionStore>,
}

pub fn fixture() -> TestFixture {
    let users = Arc::new(MockUserRepository::new());
    let apps = Arc::new(MockAppRepository::with_apps([
        App::new(APP_ID, "default", "default-app-secret"),
        App::new(PARTNER_APP_ID, "partner", "partner-app-secret"),
    ]));
    let store = Arc::new(MockSessionStore::new());

    let service = AuthService::new(
        users.clone(),
        apps,
        store.clone(),
        Arc::new(BcryptHasher::new(4)),
        AuthServiceConfig::default(),
    );

    TestFixture {
        state: web::Data::new(AppState::new(Arc::new(service))),
        users,
        store,
    }
}

impl TestFixture {
    /// Register the default user and return its id
    pub async fn register_user(&self) -> i64 {
        self.state
            .auth_service
            .register(EMAIL, PASSWORD, None)
            .await
            .unwrap()
    }
}
