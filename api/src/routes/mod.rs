//! Route handlers and the state they share

pub mod auth;
pub mod users;

use actix_web::HttpRequest;
use std::net::SocketAddr;
use std::sync::Arc;

use sso_core::repositories::{AppRepository, SessionStore, UserRepository};
use sso_core::services::AuthService;

/// Application state shared across handlers
pub struct AppState<U, A, S>
where
    U: UserRepository,
    A: AppRepository,
    S: SessionStore,
{
    pub auth_service: Arc<AuthService<U, A, S>>,
}

impl<U, A, S> AppState<U, A, S>
where
    U: UserRepository,
    A: AppRepository,
    S: SessionStore,
{
    pub fn new(auth_service: Arc<AuthService<U, A, S>>) -> Self {
        Self { auth_service }
    }
}

/// Caller address without the port, honouring `Forwarded`/`X-Forwarded-For`
pub(crate) fn client_ip(req: &HttpRequest) -> Option<String> {
    let info = req.connection_info();
    let raw = info.realip_remote_addr()?;
    Some(
        raw.parse::<SocketAddr>()
            .map(|addr| addr.ip().to_string())
            .unwrap_or_else(|_| raw.to_string()),
    )
}
