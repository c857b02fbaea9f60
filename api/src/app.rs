//! Application factory
//!
//! Builds the Actix-web application around an [`AppState`].

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use crate::handlers::json_error_handler;
use crate::routes::auth::{login, logout, refresh_token, register};
use crate::routes::users::is_admin;
use crate::routes::AppState;

use sso_core::repositories::{AppRepository, SessionStore, UserRepository};
use sso_shared::errors::ErrorResponse;

/// Create and configure the application with all dependencies
pub fn create_app<U, A, S>(
    app_state: web::Data<AppState<U, A, S>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    A: AppRepository + 'static,
    S: SessionStore + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(TracingLogger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::<U, A, S>))
                        .route("/login", web::post().to(login::<U, A, S>))
                        .route("/refresh", web::post().to(refresh_token::<U, A, S>))
                        .route("/logout", web::post().to(logout::<U, A, S>)),
                )
                .service(
                    web::scope("/users").route("/{id}/admin", web::get().to(is_admin::<U, A, S>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "sso",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
