use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{validation_error_response, RefreshTokenRequest, TokenResponse};
use crate::handlers::handle_domain_error;
use crate::routes::AppState;

use sso_core::repositories::{AppRepository, SessionStore, UserRepository};

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges the current refresh token for a new pair. The presented token
/// is consumed; presenting it again fails.
///
/// # Request Body
///
/// ```json
/// { "refresh_token": "eyJ..." }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Invalid, expired, rotated or revoked refresh token
/// - 503 Service Unavailable: Session store unreachable
pub async fn refresh_token<U, A, S>(
    state: web::Data<AppState<U, A, S>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    A: AppRepository + 'static,
    S: SessionStore + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.auth_service.refresh_token(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }),
        Err(error) => handle_domain_error(error),
    }
}
