//! Repository interfaces for accounts, refresh tokens and the revocation ledger,
//! with in-memory implementations for tests and single-process deployments.

pub mod account;
pub mod refresh_token;
pub mod revocation;

pub use account::{AccountRepository, InMemoryAccountRepository};
pub use refresh_token::{InMemoryRefreshTokenRepository, RefreshTokenRepository};
pub use revocation::{InMemoryRevocationRepository, RevocationRepository};
