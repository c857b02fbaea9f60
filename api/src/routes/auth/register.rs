use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::{validation_error_response, RegisterRequest, RegisterResponse};
use crate::handlers::handle_domain_error;
use crate::routes::{client_ip, AppState};

use sso_core::repositories::{AppRepository, SessionStore, UserRepository};

/// Handler for POST /api/v1/auth/register
///
/// # Request Body
///
/// ```json
/// { "email": "ada@example.com", "password": "secret1" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// { "user_id": 42 }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid email or password shorter than 6 characters
/// - 409 Conflict: Email already registered
/// - 503 Service Unavailable: Directory unreachable
pub async fn register<U, A, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, A, S>>,
    request: web::Json<RegisterRequest>,
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
        .register(&request.email, &request.password, client_ip(&req))
        .await
    {
        Ok(user_id) => HttpResponse::Created().json(RegisterResponse { user_id }),
        Err(error) => handle_domain_error(error),
    }
}
