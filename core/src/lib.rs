//! # TokenGate Core
//!
//! Domain layer for TokenGate: account and token entities, repository
//! interfaces with in-memory implementations, and the services that run the
//! token lifecycle (signing keys, RS256 access tokens, refresh-token rotation,
//! revocation, PKCE and the expiry sweeper).

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types for convenience
pub use domain::entities::{AccessTokenClaims, Account, RefreshTokenRecord, RevokedAccessToken, TokenPair};
pub use domain::value_objects::{AccountProfile, LoginOutcome};
pub use errors::{AuthError, DomainError, DomainResult, ErrorKind, KeyError, TokenError};
pub use repositories::{AccountRepository, RefreshTokenRepository, RevocationRepository};
pub use services::{AuthService, AuthServiceConfig, ExpirySweeper, KeyMaterial, PasswordHasher, TokenCodec};
