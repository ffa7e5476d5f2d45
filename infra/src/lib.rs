//! # Infrastructure Layer
//!
//! Concrete storage for TokenGate: a MySQL connection pool built from
//! [`DatabaseConfig`], embedded SQL migrations, and MySQL implementations of
//! the account, refresh-token and revocation repositories defined in
//! `tg_core`.

pub mod database;

pub use database::{
    DatabasePool, MySqlAccountRepository, MySqlRefreshTokenRepository, MySqlRevocationRepository,
    PoolStatistics,
};
pub use tg_shared::config::DatabaseConfig;

/// Infrastructure-specific error types
///
/// Only raised while bootstrapping; repository methods report failures as
/// `DomainError` so the service layer never sees driver types.
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
