//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, ErrorKind, KeyError, TokenError};

use thiserror::Error;

/// Core domain errors
///
/// `Auth` and `Token` carry the authentication taxonomy that callers map to
/// responses. `KeyMaterial` and `Internal` are infrastructure failures; their
/// details are for logs only and must not reach clients.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    KeyMaterial(#[from] KeyError),
}

impl DomainError {
    /// Shorthand for storage and hashing failures
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    /// Fieldless discriminant for status-code mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation { .. } => ErrorKind::Validation,
            DomainError::Internal { .. } | DomainError::KeyMaterial(_) => ErrorKind::Infrastructure,
            DomainError::Auth(AuthError::InvalidCredentials) => ErrorKind::InvalidCredentials,
            DomainError::Auth(AuthError::EmailExists) => ErrorKind::EmailExists,
            DomainError::Auth(AuthError::UserNotFound) => ErrorKind::UserNotFound,
            DomainError::Token(TokenError::TokenExpired) => ErrorKind::TokenExpired,
            DomainError::Token(TokenError::TokenInvalid) => ErrorKind::TokenInvalid,
            DomainError::Token(TokenError::TokenRevoked) => ErrorKind::TokenRevoked,
            DomainError::Token(TokenError::RefreshTokenNotFound) => ErrorKind::RefreshTokenNotFound,
        }
    }

    pub fn is_infrastructure(&self) -> bool {
        self.kind() == ErrorKind::Infrastructure
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
