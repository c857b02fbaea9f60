//! Shared fixtures and store wrappers for authentication service tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Barrier;
use tokio::task::JoinHandle;

use crate::domain::entities::{App, UserEvent};
use crate::errors::DomainError;
use crate::repositories::{MockAppRepository, MockSessionStore, MockUserRepository, SessionStore};
use crate::services::auth::{AuthService, AuthServiceConfig, SessionAppResolution};
use crate::services::events::{EventDispatcher, RecordingEventPublisher};
use crate::services::password::{BcryptHasher, PasswordHasher};

pub const APP_ID: i32 = 1;
pub const APP_SECRET: &str = "default-app-secret";
pub const PARTNER_APP_ID: i32 = 2;
pub const PARTNER_SECRET: &str = "partner-app-secret";
pub const PASSWORD: &str = "secret1";

pub fn test_config() -> AuthServiceConfig {
    AuthServiceConfig {
        session_app: SessionAppResolution::Fixed { app_id: APP_ID },
        ..AuthServiceConfig::default()
    }
}

pub fn test_apps() -> MockAppRepository {
    MockAppRepository::with_apps([
        App::new(APP_ID, "default", APP_SECRET),
        App::new(PARTNER_APP_ID, "partner", PARTNER_SECRET),
    ])
}

/// Service under test plus handles on every collaborator
pub struct TestContext<S: SessionStore = MockSessionStore> {
    pub service: AuthService<MockUserRepository, MockAppRepository, S>,
    pub users: Arc<MockUserRepository>,
    pub store: Arc<S>,
    pub publisher: RecordingEventPublisher,
    events_handle: JoinHandle<()>,
}

impl<S: SessionStore> TestContext<S> {
    /// Drop the service and wait for every queued event to be published
    pub async fn flush_events(self) -> Vec<(String, UserEvent)> {
        let TestContext {
            service,
            publisher,
            events_handle,
            ..
        } = self;
        drop(service);
        events_handle.await.unwrap();
        publisher.events()
    }
}

pub fn build() -> TestContext {
    build_with(Arc::new(MockSessionStore::new()), test_config(), RecordingEventPublisher::new())
}

pub fn build_with_config(config: AuthServiceConfig) -> TestContext {
    build_with(Arc::new(MockSessionStore::new()), config, RecordingEventPublisher::new())
}

pub fn build_with<S: SessionStore>(
    store: Arc<S>,
    config: AuthServiceConfig,
    publisher: RecordingEventPublisher,
) -> TestContext<S> {
    let users = Arc::new(MockUserRepository::new());
    let (dispatcher, events_handle) = EventDispatcher::spawn(Arc::new(publisher.clone()), 64);
    let service = AuthService::with_events(
        users.clone(),
        Arc::new(test_apps()),
        store.clone(),
        Arc::new(BcryptHasher::new(4)),
        dispatcher,
        config,
    );
    TestContext {
        service,
        users,
        store,
        publisher,
        events_handle,
    }
}

/// bcrypt hasher that counts hash and verify calls
#[derive(Default)]
pub struct CountingHasher {
    inner: BcryptHasher,
    hashes: AtomicUsize,
    verifies: AtomicUsize,
}

impl CountingHasher {
    pub fn new() -> Self {
        Self {
            inner: BcryptHasher::new(4),
            ..Self::default()
        }
    }

    pub fn hashes(&self) -> usize {
        self.hashes.load(Ordering::SeqCst)
    }

    pub fn verifies(&self) -> usize {
        self.verifies.load(Ordering::SeqCst)
    }
}

impl PasswordHasher for CountingHasher {
    fn hash(&self, password: &str) -> Result<Vec<u8>, DomainError> {
        self.hashes.fetch_add(1, Ordering::SeqCst);
        self.inner.hash(password)
    }

    fn verify(&self, password: &str, hash: &[u8]) -> bool {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(password, hash)
    }
}

/// Session store whose next two reads (or takes) wait for each other, forcing
/// two refreshes to interleave between their read and their delete
pub struct BarrierSessionStore {
    inner: MockSessionStore,
    barrier: Barrier,
    armed: AtomicUsize,
}

impl BarrierSessionStore {
    pub fn new() -> Self {
        Self {
            inner: MockSessionStore::new(),
            barrier: Barrier::new(2),
            armed: AtomicUsize::new(0),
        }
    }

    pub fn arm(&self) {
        self.armed.store(2, Ordering::SeqCst);
    }

    async fn rendezvous(&self) {
        let claimed = self
            .armed
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if claimed {
            self.barrier.wait().await;
        }
    }
}

#[async_trait]
impl SessionStore for BarrierSessionStore {
    async fn save_token(&self, user_id: i64, token: &str, ttl: Duration) -> Result<(), DomainError> {
        self.inner.save_token(user_id, token, ttl).await
    }

    async fn get_token(&self, user_id: i64) -> Result<Option<String>, DomainError> {
        let token = self.inner.get_token(user_id).await;
        self.rendezvous().await;
        token
    }

    async fn delete_token(&self, user_id: i64) -> Result<(), DomainError> {
        self.inner.delete_token(user_id).await
    }

    async fn take_token_if_matches(&self, user_id: i64, token: &str) -> Result<bool, DomainError> {
        self.rendezvous().await;
        self.inner.take_token_if_matches(user_id, token).await
    }
}

const HEALTHY: u8 = 0;
const STALLED: u8 = 1;
const FAILING: u8 = 2;

/// Session store that can be switched to hang forever or to fail
pub struct FaultySessionStore {
    inner: MockSessionStore,
    mode: AtomicU8,
}

impl FaultySessionStore {
    pub fn new() -> Self {
        Self {
            inner: MockSessionStore::new(),
            mode: AtomicU8::new(HEALTHY),
        }
    }

    pub fn stall(&self) {
        self.mode.store(STALLED, Ordering::SeqCst);
    }

    pub fn fail(&self) {
        self.mode.store(FAILING, Ordering::SeqCst);
    }

    async fn fault(&self) -> Result<(), DomainError> {
        match self.mode.load(Ordering::SeqCst) {
            STALLED => std::future::pending().await,
            FAILING => Err(DomainError::transient("connection refused")),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl SessionStore for FaultySessionStore {
    async fn save_token(&self, user_id: i64, token: &str, ttl: Duration) -> Result<(), DomainError> {
        self.fault().await?;
        self.inner.save_token(user_id, token, ttl).await
    }

    async fn get_token(&self, user_id: i64) -> Result<Option<String>, DomainError> {
        self.fault().await?;
        self.inner.get_token(user_id).await
    }

    async fn delete_token(&self, user_id: i64) -> Result<(), DomainError> {
        self.fault().await?;
        self.inner.delete_token(user_id).await
    }

    async fn take_token_if_matches(&self, user_id: i64, token: &str) -> Result<bool, DomainError> {
        self.fault().await?;
        self.inner.take_token_if_matches(user_id, token).await
    }
}
