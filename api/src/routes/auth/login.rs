use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::{validation_error_response, LoginRequest, TokenResponse};
use crate::handlers::handle_domain_error;
use crate::routes::{client_ip, AppState};

use sso_core::repositories::{AppRepository, SessionStore, UserRepository};

/// Handler for POST /api/v1/auth/login
///
/// Issues an access/refresh pair signed with the requested app's secret.
/// A successful login replaces any session the user already had.
///
/// # Request Body
///
/// ```json
/// { "email": "ada@example.com", "password": "secret1", "app_id": 1 }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Validation failure or wrong email/password
/// - 404 Not Found: Unknown app
/// - 503 Service Unavailable: Directory or session store unreachable
pub async fn login<U, A, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, A, S>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    A: AppRepository + 'static,
    S: SessionStore + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .login(
            &request.email,
            &request.password,
            request.app_id,
            client_ip(&req),
        )
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }),
        Err(error) => handle_domain_error(error),
    }
}
