//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and health checks
//! - Embedded migrations for the three token tables
//! - Repository implementations for accounts, refresh tokens and revocations

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlAccountRepository, MySqlRefreshTokenRepository, MySqlRevocationRepository};
