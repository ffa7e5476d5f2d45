//! MySQL implementations of the core repository traits

mod account_repository_impl;
mod refresh_token_repository_impl;
mod revocation_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use refresh_token_repository_impl::MySqlRefreshTokenRepository;
pub use revocation_repository_impl::MySqlRevocationRepository;

use tg_core::errors::DomainError;
use uuid::Uuid;

/// Wrap a driver error as an opaque storage failure
pub(crate) fn storage_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "{}", context);
    DomainError::internal(format!("{}: {}", context, e))
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map_or(false, |db| db.is_unique_violation())
}

/// UUIDs are stored as `CHAR(36)`
pub(crate) fn parse_uuid(column: &str, value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value)
        .map_err(|e| DomainError::internal(format!("Invalid UUID in {}: {}", column, e)))
}
