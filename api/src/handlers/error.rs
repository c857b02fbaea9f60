//! Domain error to HTTP response mapping

use actix_web::{error::InternalError, error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};

use sso_core::errors::{AuthError, DomainError, TokenError};
use sso_shared::errors::{error_codes, ErrorResponse};

use crate::dto::ErrorResponseExt;

/// Status, error code and client-facing message for a domain error
pub fn error_status(error: &DomainError) -> (StatusCode, &'static str, String) {
    match error {
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            message.clone(),
        ),
        DomainError::Auth(auth_error) => {
            let (status, code) = match auth_error {
                AuthError::InvalidCredentials => {
                    (StatusCode::BAD_REQUEST, error_codes::INVALID_CREDENTIALS)
                }
                AuthError::UserAlreadyExists => (StatusCode::CONFLICT, error_codes::USER_EXISTS),
                AuthError::InvalidApp => (StatusCode::NOT_FOUND, error_codes::INVALID_APP),
                AuthError::UserNotFound => (StatusCode::NOT_FOUND, error_codes::USER_NOT_FOUND),
                AuthError::InvalidRefreshToken => {
                    (StatusCode::UNAUTHORIZED, error_codes::INVALID_REFRESH_TOKEN)
                }
                AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED),
            };
            (status, code, auth_error.to_string())
        }
        DomainError::Token(TokenError::TokenGenerationFailed) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "An internal error occurred".to_string(),
        ),
        DomainError::Token(token_error) => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_INVALID,
            token_error.to_string(),
        ),
        DomainError::Transient { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            "Service temporarily unavailable, please retry".to_string(),
        ),
        // Internal details stay in the logs
        DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "An internal error occurred".to_string(),
        ),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let (status, code, message) = error_status(&error);

    if status.is_server_error() {
        tracing::error!(error = %error, status = status.as_u16(), "Request failed");
    } else {
        tracing::debug!(error = %error, status = status.as_u16(), "Request rejected");
    }

    ErrorResponse::new(code, message).to_response(status)
}

/// Malformed JSON bodies answer with the standard error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, err.to_string())
        .to_response(StatusCode::BAD_REQUEST);
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::Auth(AuthError::InvalidCredentials), StatusCode::BAD_REQUEST),
            (DomainError::Auth(AuthError::UserAlreadyExists), StatusCode::CONFLICT),
            (DomainError::Auth(AuthError::InvalidApp), StatusCode::NOT_FOUND),
            (DomainError::Auth(AuthError::UserNotFound), StatusCode::NOT_FOUND),
            (DomainError::Auth(AuthError::InvalidRefreshToken), StatusCode::UNAUTHORIZED),
            (DomainError::Auth(AuthError::Unauthorized), StatusCode::UNAUTHORIZED),
            (DomainError::Token(TokenError::InvalidToken), StatusCode::UNAUTHORIZED),
            (
                DomainError::Token(TokenError::TokenGenerationFailed),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (DomainError::transient("redis down"), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error_status(&error).0, expected, "{error:?}");
        }
    }

    #[test]
    fn test_internal_details_are_not_echoed() {
        let (_, code, message) = error_status(&DomainError::internal("db password=hunter2"));
        assert_eq!(code, error_codes::INTERNAL_ERROR);
        assert!(!message.contains("hunter2"));

        let (_, _, message) = error_status(&DomainError::transient("10.0.0.5:6379 refused"));
        assert!(!message.contains("10.0.0.5"));
    }
}
