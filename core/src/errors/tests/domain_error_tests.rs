//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, ErrorKind, KeyError, TokenError};

#[test]
fn test_auth_errors_map_to_kinds() {
    assert_eq!(
        DomainError::from(AuthError::InvalidCredentials).kind(),
        ErrorKind::InvalidCredentials
    );
    assert_eq!(
        DomainError::from(AuthError::EmailExists).kind(),
        ErrorKind::EmailExists
    );
    assert_eq!(
        DomainError::from(AuthError::UserNotFound).kind(),
        ErrorKind::UserNotFound
    );
}

#[test]
fn test_token_errors_map_to_kinds() {
    let cases = [
        (TokenError::TokenExpired, ErrorKind::TokenExpired),
        (TokenError::TokenInvalid, ErrorKind::TokenInvalid),
        (TokenError::TokenRevoked, ErrorKind::TokenRevoked),
        (TokenError::RefreshTokenNotFound, ErrorKind::RefreshTokenNotFound),
    ];
    for (error, kind) in cases {
        assert_eq!(DomainError::from(error).kind(), kind);
    }
}

#[test]
fn test_infrastructure_errors_are_opaque() {
    let storage = DomainError::internal("connection refused");
    let keys = DomainError::from(KeyError::KeyMismatch);

    assert!(storage.is_infrastructure());
    assert!(keys.is_infrastructure());
    assert!(!DomainError::from(TokenError::TokenInvalid).is_infrastructure());
}

#[test]
fn test_credentials_message_does_not_reveal_which_part_failed() {
    let message = AuthError::InvalidCredentials.to_string();
    assert_eq!(message, "Invalid email or password");
}

#[test]
fn test_transparent_display() {
    let error: DomainError = TokenError::TokenRevoked.into();
    assert_eq!(error.to_string(), "Token revoked");

    let error = DomainError::validation("length must be between 43 and 128");
    assert!(error.to_string().contains("43"));
}
