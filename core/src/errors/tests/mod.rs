use super::*;

#[test]
fn test_only_transient_is_retryable() {
    assert!(DomainError::transient("redis down").is_retryable());
    assert!(!DomainError::internal("boom").is_retryable());
    assert!(!DomainError::from(AuthError::InvalidRefreshToken).is_retryable());
    assert!(!DomainError::from(TokenError::InvalidToken).is_retryable());
}

#[test]
fn test_bridged_errors_are_transparent() {
    let err: DomainError = AuthError::InvalidCredentials.into();
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
}
