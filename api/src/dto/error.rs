use actix_web::{http::StatusCode, HttpResponse};
use std::collections::HashMap;
use validator::ValidationErrors;

pub use sso_shared::errors::ErrorResponse;
use sso_shared::errors::error_codes;

// Extension trait for ErrorResponse to add actix-web specific methods
pub trait ErrorResponseExt {
    fn to_response(&self, status: StatusCode) -> HttpResponse;
}

impl ErrorResponseExt for ErrorResponse {
    fn to_response(&self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

/// 400 response listing the failed rule codes per field
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let details: HashMap<String, serde_json::Value> = errors
        .field_errors()
        .into_iter()
        .map(|(field, failures)| {
            let codes: Vec<String> = failures.iter().map(|f| f.code.to_string()).collect();
            (field.to_string(), serde_json::json!(codes))
        })
        .collect();

    ErrorResponse::with_details(
        error_codes::VALIDATION_ERROR,
        "Request validation failed",
        details,
    )
    .to_response(StatusCode::BAD_REQUEST)
}
