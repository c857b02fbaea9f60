use actix_web::{web, HttpResponse};

use crate::handlers::handle_domain_error;
use crate::routes::AppState;

use sso_core::errors::DomainError;
use sso_core::repositories::{AppRepository, SessionStore, UserRepository};

use crate::dto::IsAdminResponse;

/// Handler for GET /api/v1/users/{id}/admin
///
/// ## Errors
/// - 400 Bad Request: User id 0
/// - 404 Not Found: No such user
pub async fn is_admin<U, A, S>(
    state: web::Data<AppState<U, A, S>>,
    path: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    A: AppRepository + 'static,
    S: SessionStore + 'static,
{
    let user_id = path.into_inner();
    if user_id == 0 {
        return handle_domain_error(DomainError::Validation {
            message: "user_id is required".to_string(),
        });
    }

    match state.auth_service.is_admin(user_id).await {
        Ok(is_admin) => HttpResponse::Ok().json(IsAdminResponse { is_admin }),
        Err(error) => handle_domain_error(error),
    }
}
