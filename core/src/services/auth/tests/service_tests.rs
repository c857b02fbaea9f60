//! Unit tests for registration, login, logout and the admin check

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{App, EventType, User};
use crate::errors::{AuthError, DomainError};
use crate::repositories::{MockSessionStore, MockUserRepository, SessionStore, UserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::events::RecordingEventPublisher;
use crate::services::token::TokenCodec;

use super::mocks::*;

#[tokio::test]
async fn test_register_returns_new_id() {
    let ctx = build();

    let id = ctx.service.register("a@x.com", PASSWORD, None).await.unwrap();

    let user = ctx.users.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(user.email, "a@x.com");
    assert_ne!(user.pass_hash, PASSWORD.as_bytes().to_vec());
}

#[tokio::test]
async fn test_duplicate_registration_keeps_first_hash() {
    let ctx = build();
    ctx.service.register("a@x.com", "secret1", None).await.unwrap();
    let original = ctx.users.find_by_email("a@x.com").await.unwrap().unwrap();

    let result = ctx.service.register("a@x.com", "secret2", None).await;

    assert!(matches!(result, Err(DomainError::Auth(AuthError::UserAlreadyExists))));
    let after = ctx.users.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(after.pass_hash, original.pass_hash);
    assert!(ctx.service.login("a@x.com", "secret1", APP_ID, None).await.is_ok());
    assert!(ctx.service.login("a@x.com", "secret2", APP_ID, None).await.is_err());
}

#[tokio::test]
async fn test_login_issues_tokens_bound_to_user_and_app() {
    let ctx = build();
    let id = ctx.service.register("a@x.com", PASSWORD, None).await.unwrap();

    let pair = ctx.service.login("a@x.com", PASSWORD, APP_ID, None).await.unwrap();

    let codec = TokenCodec::new();
    let access = codec.verify(&pair.access_token, APP_SECRET).unwrap();
    let refresh = codec.verify(&pair.refresh_token, APP_SECRET).unwrap();
    assert_eq!(access.user_id, id);
    assert_eq!(refresh.user_id, id);
    assert_eq!(access.email, "a@x.com");
    assert_eq!(codec.peek_app_id(&pair.access_token), Some(APP_ID));
    assert_ne!(pair.access_token, pair.refresh_token);
    assert_eq!(ctx.store.get_token(id).await.unwrap(), Some(pair.refresh_token));
}

#[tokio::test]
async fn test_login_under_partner_app_uses_partner_secret() {
    let ctx = build();
    ctx.service.register("a@x.com", PASSWORD, None).await.unwrap();

    let pair = ctx.service.login("a@x.com", PASSWORD, PARTNER_APP_ID, None).await.unwrap();

    let codec = TokenCodec::new();
    assert!(codec.verify(&pair.access_token, PARTNER_SECRET).is_ok());
    assert!(codec.verify(&pair.access_token, APP_SECRET).is_err());
}

#[tokio::test]
async fn test_unknown_user_and_wrong_password_are_indistinguishable() {
    let ctx = build();
    ctx.service.register("known@x.com", PASSWORD, None).await.unwrap();

    let unknown = ctx.service.login("nouser@x.com", "x", APP_ID, None).await.unwrap_err();
    let wrong = ctx.service.login("known@x.com", "wrongpass", APP_ID, None).await.unwrap_err();

    assert!(matches!(unknown, DomainError::Auth(AuthError::InvalidCredentials)));
    assert!(matches!(wrong, DomainError::Auth(AuthError::InvalidCredentials)));
    assert_eq!(unknown.to_string(), wrong.to_string());
    assert!(ctx.store.get_token(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unknown_user_still_checks_a_password_hash() {
    let hasher = Arc::new(CountingHasher::new());
    let service = AuthService::new(
        Arc::new(MockUserRepository::new()),
        Arc::new(test_apps()),
        Arc::new(MockSessionStore::new()),
        hasher.clone(),
        test_config(),
    );
    service.register("known@x.com", PASSWORD, None).await.unwrap();
    assert_eq!(hasher.hashes(), 1);

    let wrong = service.login("known@x.com", "wrongpass", APP_ID, None).await.unwrap_err();
    assert_eq!(hasher.verifies(), 1);

    let unknown = service.login("nouser@x.com", PASSWORD, APP_ID, None).await.unwrap_err();
    assert_eq!(hasher.verifies(), 2);
    assert!(matches!(unknown, DomainError::Auth(AuthError::InvalidCredentials)));
    assert!(matches!(wrong, DomainError::Auth(AuthError::InvalidCredentials)));

    // The placeholder hash is computed once and reused
    service.login("other@x.com", PASSWORD, APP_ID, None).await.unwrap_err();
    assert_eq!(hasher.hashes(), 2);
    assert_eq!(hasher.verifies(), 3);
}

#[tokio::test]
async fn test_login_with_unknown_app() {
    let ctx = build();
    let id = ctx.service.register("a@x.com", PASSWORD, None).await.unwrap();

    let result = ctx.service.login("a@x.com", PASSWORD, 404, None).await;

    assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidApp))));
    assert!(ctx.store.get_token(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_second_login_replaces_session() {
    let ctx = build();
    ctx.service.register("a@x.com", PASSWORD, None).await.unwrap();

    let first = ctx.service.login("a@x.com", PASSWORD, APP_ID, None).await.unwrap();
    let second = ctx.service.login("a@x.com", PASSWORD, APP_ID, None).await.unwrap();

    assert_ne!(first.refresh_token, second.refresh_token);
    let stale = ctx.service.refresh_token(&first.refresh_token).await;
    assert!(matches!(stale, Err(DomainError::Auth(AuthError::InvalidRefreshToken))));
    assert!(ctx.service.refresh_token(&second.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_logout_removes_session() {
    let ctx = build();
    let id = ctx.service.register("a@x.com", PASSWORD, None).await.unwrap();
    let pair = ctx.service.login("a@x.com", PASSWORD, APP_ID, None).await.unwrap();

    assert!(ctx.service.logout(&pair.access_token, None).await.unwrap());

    assert!(ctx.store.get_token(id).await.unwrap().is_none());
    let result = ctx.service.refresh_token(&pair.refresh_token).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidRefreshToken))));
}

#[tokio::test]
async fn test_logout_is_idempotent_and_accepts_refresh_tokens() {
    let ctx = build();
    ctx.service.register("a@x.com", PASSWORD, None).await.unwrap();
    let pair = ctx.service.login("a@x.com", PASSWORD, APP_ID, None).await.unwrap();

    assert!(ctx.service.logout(&format!("Bearer {}", pair.refresh_token), None).await.unwrap());
    assert!(ctx.service.logout(&pair.access_token, None).await.unwrap());
}

#[tokio::test]
async fn test_logout_rejects_bad_tokens() {
    let ctx = build();
    let foreign = TokenCodec::new()
        .issue(&User::new(1, "a@x.com", Vec::new()), &App::new(APP_ID, "default", "wrong"), Duration::from_secs(60))
        .unwrap();

    for token in ["", "Bearer ", "garbage", foreign.as_str()] {
        let result = ctx.service.logout(token, None).await;
        assert!(
            matches!(result, Err(DomainError::Auth(AuthError::Unauthorized))),
            "token {:?} should be rejected",
            token
        );
    }
}

#[tokio::test]
async fn test_expired_access_token_cannot_logout() {
    let config = AuthServiceConfig {
        access_token_ttl: Duration::ZERO,
        ..test_config()
    };
    let ctx = build_with_config(config);
    ctx.service.register("a@x.com", PASSWORD, None).await.unwrap();
    let pair = ctx.service.login("a@x.com", PASSWORD, APP_ID, None).await.unwrap();

    let result = ctx.service.logout(&pair.access_token, None).await;

    assert!(matches!(result, Err(DomainError::Auth(AuthError::Unauthorized))));
}

#[tokio::test]
async fn test_is_admin() {
    let ctx = build();
    let admin = ctx.service.register("admin@x.com", PASSWORD, None).await.unwrap();
    let plain = ctx.service.register("plain@x.com", PASSWORD, None).await.unwrap();
    ctx.users.set_admin(admin).await;

    assert!(ctx.service.is_admin(admin).await.unwrap());
    assert!(!ctx.service.is_admin(plain).await.unwrap());
    assert!(matches!(
        ctx.service.is_admin(9999).await,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_lifecycle_events() {
    let ctx = build();
    let id = ctx.service.register("a@x.com", PASSWORD, Some("10.0.0.1".into())).await.unwrap();
    let pair = ctx.service.login("a@x.com", PASSWORD, APP_ID, Some("10.0.0.2".into())).await.unwrap();
    let rotated = ctx.service.refresh_token(&pair.refresh_token).await.unwrap();
    ctx.service.logout(&rotated.access_token, Some("10.0.0.3".into())).await.unwrap();

    let events = ctx.flush_events().await;

    let kinds: Vec<EventType> = events.iter().map(|(_, e)| e.event_type).collect();
    assert_eq!(kinds, vec![EventType::Registered, EventType::LoggedIn, EventType::LoggedOut]);
    for (key, event) in &events {
        assert_eq!(key, &id.to_string());
        assert_eq!(event.user_id, id);
        assert_eq!(event.email, "a@x.com");
    }
    assert_eq!(events[1].1.ip.as_deref(), Some("10.0.0.2"));
}

#[tokio::test]
async fn test_failed_operations_emit_nothing() {
    let ctx = build();
    ctx.service.register("a@x.com", PASSWORD, None).await.unwrap();
    let _ = ctx.service.register("a@x.com", PASSWORD, None).await;
    let _ = ctx.service.login("a@x.com", "wrongpass", APP_ID, None).await;
    let _ = ctx.service.logout("garbage", None).await;

    let events = ctx.flush_events().await;

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].1.event_type, EventType::Registered);
}

#[tokio::test]
async fn test_publish_failure_does_not_fail_operations() {
    let ctx = build_with(
        std::sync::Arc::new(crate::repositories::MockSessionStore::new()),
        test_config(),
        RecordingEventPublisher::failing(),
    );

    let id = ctx.service.register("a@x.com", PASSWORD, None).await.unwrap();
    let pair = ctx.service.login("a@x.com", PASSWORD, APP_ID, None).await.unwrap();
    assert!(ctx.service.logout(&pair.access_token, None).await.unwrap());

    assert!(id > 0);
    assert!(ctx.flush_events().await.is_empty());
}
