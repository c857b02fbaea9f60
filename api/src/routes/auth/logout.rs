use actix_web::{http::header, web, HttpRequest, HttpResponse};

use crate::dto::{LogoutRequest, LogoutResponse};
use crate::handlers::handle_domain_error;
use crate::routes::{client_ip, AppState};

use sso_core::repositories::{AppRepository, SessionStore, UserRepository};

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the caller's session. The credential is read from the
/// `Authorization: Bearer` header, or from `{"token": "..."}` in the body.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid credential
/// - 503 Service Unavailable: Session store unreachable
pub async fn logout<U, A, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, A, S>>,
    body: Option<web::Json<LogoutRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    A: AppRepository + 'static,
    S: SessionStore + 'static,
{
    let token = authorization_header(&req)
        .or_else(|| body.and_then(|b| b.into_inner().token))
        .unwrap_or_default();

    match state.auth_service.logout(&token, client_ip(&req)).await {
        Ok(success) => HttpResponse::Ok().json(LogoutResponse { success }),
        Err(error) => handle_domain_error(error),
    }
}

// The service strips the Bearer prefix itself
fn authorization_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
