//! Revocation ledger trait: revoked access-token identifiers kept until the
//! token would have expired anyway.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainResult;

#[async_trait]
pub trait RevocationRepository: Send + Sync {
    /// Record a revoked token identifier
    ///
    /// Adding a `jti` that is already present succeeds without changing the
    /// stored entry.
    async fn add(&self, jti: &str, expires_at: DateTime<Utc>) -> DomainResult<()>;

    async fn contains(&self, jti: &str) -> DomainResult<bool>;

    /// Delete entries with `expires_at < now`, returning how many were removed
    async fn cleanup(&self, now: DateTime<Utc>) -> DomainResult<u64>;
}
