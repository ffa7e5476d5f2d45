//! Error kinds for authentication, token handling and key material

use thiserror::Error;

/// Account and credential failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are never distinguished
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailExists,

    #[error("User not found")]
    UserNotFound,
}

/// Access and refresh token failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    /// Bad signature, wrong algorithm, wrong issuer or malformed claims
    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,
}

/// Signing key generation, loading and persistence failures
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("RSA modulus of {bits} bits is below the {min}-bit minimum")]
    WeakKey { bits: usize, min: usize },

    #[error("Failed to generate RSA keypair: {message}")]
    Generation { message: String },

    #[error("Failed to access key file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected PEM block in {path}: expected one of {expected}, found {found}")]
    UnexpectedPemLabel {
        path: String,
        expected: &'static str,
        found: String,
    },

    #[error("Invalid key material in {path}: {message}")]
    InvalidKey { path: String, message: String },

    #[error("Public key does not belong to the private key")]
    KeyMismatch,

    #[error("Only one of {private_path} and {public_path} exists")]
    IncompleteKeyPair {
        private_path: String,
        public_path: String,
    },
}

/// Fieldless view of [`super::DomainError`] used to pick HTTP statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCredentials,
    EmailExists,
    UserNotFound,
    TokenExpired,
    TokenInvalid,
    TokenRevoked,
    RefreshTokenNotFound,
    Validation,
    Infrastructure,
}
