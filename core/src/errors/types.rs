//! Error types for authentication and credential handling

use thiserror::Error;

/// Authentication-related errors
///
/// Messages are intentionally generic; the transport layer maps each variant
/// to a status code and error code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password. Both cases are reported identically.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid app id")]
    InvalidApp,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("User not found")]
    UserNotFound,
}

/// Credential codec errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is missing")]
    MissingToken,

    #[error("Unexpected signing method")]
    UnexpectedAlgorithm,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has no numeric uid claim")]
    MissingSubject,

    #[error("Token has no string email claim")]
    MissingEmail,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}
