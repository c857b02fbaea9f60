//! Main authentication service implementation

use std::future::Future;
use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use tokio::sync::OnceCell;

use crate::domain::entities::app::App;
use crate::domain::entities::event::{EventType, UserEvent};
use crate::domain::entities::token::{TokenPair, VerifiedUser};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{AppRepository, SessionStore, UserRepository};
use crate::services::events::EventDispatcher;
use crate::services::password::{BcryptHasher, PasswordHasher};
use crate::services::token::{strip_bearer, TokenCodec};

use super::config::{AuthServiceConfig, RotationMode, SessionAppResolution};

/// Hashed once per service and checked against when the email is unknown
const DUMMY_PASSWORD: &str = "sso-dummy-password";

/// Authentication service managing the token lifecycle
pub struct AuthService<U, A, S, H = BcryptHasher>
where
    U: UserRepository,
    A: AppRepository,
    S: SessionStore,
    H: PasswordHasher,
{
    /// Credential directory for users
    user_repository: Arc<U>,
    /// Credential directory for tenants and their secrets
    app_repository: Arc<A>,
    /// Single-slot refresh token store
    session_store: Arc<S>,
    /// Password hash and verify primitives
    hasher: Arc<H>,
    /// Token signing and verification
    codec: TokenCodec,
    /// Optional best-effort event sink
    events: Option<EventDispatcher>,
    /// Service configuration
    config: AuthServiceConfig,
    /// Hash verified against for unknown emails so both login failures cost the same
    dummy_hash: OnceCell<Vec<u8>>,
}

impl<U, A, S, H> AuthService<U, A, S, H>
where
    U: UserRepository,
    A: AppRepository,
    S: SessionStore,
    H: PasswordHasher,
{
    /// Create a new authentication service without event publishing
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Directory of users
    /// * `app_repository` - Directory of tenants
    /// * `session_store` - Refresh token store
    /// * `hasher` - Password hasher
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        app_repository: Arc<A>,
        session_store: Arc<S>,
        hasher: Arc<H>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            app_repository,
            session_store,
            hasher,
            codec: TokenCodec::new(),
            events: None,
            config,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Create a new authentication service that emits user events
    pub fn with_events(
        user_repository: Arc<U>,
        app_repository: Arc<A>,
        session_store: Arc<S>,
        hasher: Arc<H>,
        events: EventDispatcher,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            events: Some(events),
            ..Self::new(user_repository, app_repository, session_store, hasher, config)
        }
    }

    /// Register a new user
    ///
    /// # Arguments
    ///
    /// * `email` - Unique email address
    /// * `password` - Plain text password, hashed before it leaves this call
    /// * `client_ip` - Origin address recorded on the event
    ///
    /// # Returns
    ///
    /// * `Ok(i64)` - Id of the new user
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email taken
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        client_ip: Option<String>,
    ) -> DomainResult<i64> {
        // Step 1: Hash password
        let pass_hash = self.hash_password(password).await?;

        // Step 2: Create the user, the directory reports duplicate emails
        let user_id = self
            .with_deadline("save_user", self.user_repository.save_user(email, &pass_hash))
            .await
            .map_err(|e| {
                if matches!(e, DomainError::Auth(AuthError::UserAlreadyExists)) {
                    tracing::info!(op = "register", "Registration rejected, email already exists");
                }
                e
            })?;

        // Step 3: Emit event
        self.emit(EventType::Registered, user_id, email, client_ip);

        tracing::info!(op = "register", user_id, "User registered");
        Ok(user_id)
    }

    /// Authenticate with email and password and open a session under `app_id`
    ///
    /// A successful login replaces any refresh token stored for the user, so an
    /// earlier session can no longer be refreshed.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Access and refresh tokens signed with the app secret
    /// * `Err(DomainError::Auth(AuthError::InvalidCredentials))` - Unknown email or wrong password
    /// * `Err(DomainError::Auth(AuthError::InvalidApp))` - Unknown app
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        app_id: i32,
        client_ip: Option<String>,
    ) -> DomainResult<TokenPair> {
        // Step 1: Look up the user, absence looks like a wrong password
        let Some(user) = self
            .with_deadline("find_user_by_email", self.user_repository.find_by_email(email))
            .await?
        else {
            // Same bcrypt work as a wrong password
            let dummy = self
                .dummy_hash
                .get_or_try_init(|| self.hash_password(DUMMY_PASSWORD))
                .await?
                .clone();
            self.verify_password(password, dummy).await?;
            tracing::info!(op = "login", "Login rejected, invalid credentials");
            return Err(AuthError::InvalidCredentials.into());
        };

        // Step 2: Compare password hash
        if !self.verify_password(password, user.pass_hash.clone()).await? {
            tracing::info!(op = "login", "Login rejected, invalid credentials");
            return Err(AuthError::InvalidCredentials.into());
        }

        // Step 3: Look up the app
        let app = self.find_app(app_id).await?.ok_or_else(|| {
            tracing::info!(op = "login", app_id, "Login rejected, unknown app");
            DomainError::Auth(AuthError::InvalidApp)
        })?;

        // Step 4: Issue both tokens under the app secret
        let pair = self.issue_pair(&user, &app)?;

        // Step 5: Store the refresh token, overwriting any previous session
        self.with_deadline(
            "save_token",
            self.session_store
                .save_token(user.id, &pair.refresh_token, self.config.refresh_token_ttl),
        )
        .await?;

        // Step 6: Emit event
        self.emit(EventType::LoggedIn, user.id, &user.email, client_ip);

        tracing::info!(op = "login", user_id = user.id, app_id, "User logged in");
        Ok(pair)
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// The presented token must match the stored one exactly and is consumed.
    /// With [`RotationMode::ReadCompareDelete`] the read, compare and delete
    /// are separate store calls, so two concurrent calls carrying the same
    /// token can both succeed; the later write decides which new refresh
    /// token stays valid. [`RotationMode::AtomicTake`] lets only one through.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The replacement pair
    /// * `Err(DomainError::Auth(AuthError::InvalidRefreshToken))` - Bad, expired, unmatched or replayed token
    pub async fn refresh_token(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let presented = strip_bearer(refresh_token);

        // Step 1: Resolve the signing app and verify
        let (app, verified) = self
            .verify_session_token(presented)
            .await
            .map_err(|e| match e {
                DomainError::Token(reason) => {
                    tracing::info!(op = "refresh", reason = %reason, "Refresh rejected, token invalid");
                    DomainError::Auth(AuthError::InvalidRefreshToken)
                }
                other => other,
            })?;
        let user_id = verified.user_id;

        // Steps 2-4: Consume the stored token
        match self.config.rotation {
            RotationMode::ReadCompareDelete => {
                let stored = self
                    .with_deadline("get_token", self.session_store.get_token(user_id))
                    .await?
                    .ok_or_else(|| {
                        tracing::info!(op = "refresh", user_id, "Refresh rejected, no active session");
                        DomainError::Auth(AuthError::InvalidRefreshToken)
                    })?;

                if !constant_time_eq(stored.as_bytes(), presented.as_bytes()) {
                    tracing::info!(op = "refresh", user_id, "Refresh rejected, token does not match session");
                    return Err(AuthError::InvalidRefreshToken.into());
                }

                self.with_deadline("delete_token", self.session_store.delete_token(user_id))
                    .await?;
            }
            RotationMode::AtomicTake => {
                let taken = self
                    .with_deadline(
                        "take_token",
                        self.session_store.take_token_if_matches(user_id, presented),
                    )
                    .await?;
                if !taken {
                    tracing::info!(op = "refresh", user_id, "Refresh rejected, token does not match session");
                    return Err(AuthError::InvalidRefreshToken.into());
                }
            }
        }

        // Step 5: Issue and store the replacement pair
        let user = User::new(user_id, verified.email, Vec::new());
        let pair = self.issue_pair(&user, &app)?;
        self.with_deadline(
            "save_token",
            self.session_store
                .save_token(user_id, &pair.refresh_token, self.config.refresh_token_ttl),
        )
        .await?;

        tracing::info!(op = "refresh", user_id, app_id = app.id, "Session rotated");
        Ok(pair)
    }

    /// End the session identified by an access or refresh token
    ///
    /// Issued access tokens stay valid until they expire; only the stored
    /// refresh token is removed.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Session closed, also when none was stored
    /// * `Err(DomainError::Auth(AuthError::Unauthorized))` - Token failed verification
    pub async fn logout(&self, token: &str, client_ip: Option<String>) -> DomainResult<bool> {
        // Step 1: Verify the presented token
        let (_, verified) = self
            .verify_session_token(strip_bearer(token))
            .await
            .map_err(|e| match e {
                DomainError::Token(reason) => {
                    tracing::info!(op = "logout", reason = %reason, "Logout rejected, token invalid");
                    DomainError::Auth(AuthError::Unauthorized)
                }
                other => other,
            })?;

        // Step 2: Delete the stored refresh token
        self.with_deadline("delete_token", self.session_store.delete_token(verified.user_id))
            .await?;

        // Step 3: Emit event
        self.emit(EventType::LoggedOut, verified.user_id, &verified.email, client_ip);

        tracing::info!(op = "logout", user_id = verified.user_id, "User logged out");
        Ok(true)
    }

    /// Admin flag for `user_id`
    pub async fn is_admin(&self, user_id: i64) -> DomainResult<bool> {
        self.with_deadline("is_admin", self.user_repository.is_admin(user_id))
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }

    /// Resolve the app whose secret verifies `token`, then verify it.
    ///
    /// Verification failures, including an unknown app named by the token,
    /// come back as `DomainError::Token`.
    async fn verify_session_token(&self, token: &str) -> DomainResult<(App, VerifiedUser)> {
        if token.is_empty() {
            return Err(TokenError::MissingToken.into());
        }

        let app = match self.config.session_app {
            SessionAppResolution::Fixed { app_id } => {
                self.find_app(app_id).await?.ok_or_else(|| {
                    tracing::error!(app_id, "Configured session app does not exist");
                    DomainError::internal("session app is not configured")
                })?
            }
            SessionAppResolution::FromClaims => {
                let app_id = self
                    .codec
                    .peek_app_id(token)
                    .ok_or(DomainError::Token(TokenError::InvalidToken))?;
                self.find_app(app_id)
                    .await?
                    .ok_or(DomainError::Token(TokenError::InvalidToken))?
            }
        };

        let verified = self.codec.verify(token, &app.secret)?;
        Ok((app, verified))
    }

    async fn find_app(&self, app_id: i32) -> DomainResult<Option<App>> {
        self.with_deadline("find_app", self.app_repository.find_by_id(app_id))
            .await
    }

    fn issue_pair(&self, user: &User, app: &App) -> DomainResult<TokenPair> {
        let access_token = self.codec.issue(user, app, self.config.access_token_ttl)?;
        let refresh_token = self.codec.issue(user, app, self.config.refresh_token_ttl)?;
        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Run a collaborator call under the configured deadline
    async fn with_deadline<T, F>(&self, op: &'static str, call: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(result) => result.map_err(|e| {
                if e.is_retryable() {
                    tracing::warn!(op, error = %e, "Store call failed");
                }
                e
            }),
            Err(_) => {
                tracing::warn!(op, timeout_ms = self.config.store_timeout.as_millis() as u64, "Store call timed out");
                Err(DomainError::transient(format!("{} timed out", op)))
            }
        }
    }

    async fn hash_password(&self, password: &str) -> DomainResult<Vec<u8>> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: &str, hash: Vec<u8>) -> DomainResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Password verification task failed: {}", e)))
    }

    fn emit(&self, event_type: EventType, user_id: i64, email: &str, client_ip: Option<String>) {
        if let Some(ref events) = self.events {
            events.dispatch(UserEvent::new(event_type, user_id, email, client_ip));
        }
    }
}
