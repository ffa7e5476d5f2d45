//! Refresh token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::{DomainResult, TokenError};

/// Repository for hashed refresh tokens
///
/// Every mutation must be a single atomic statement (conditional update or
/// delete-by-predicate) so a refresh racing a logout or a sweep cannot
/// resurrect a revoked token.
///
/// # Security Considerations
/// - Only the hash of a refresh secret is ever passed in
/// - Revoked records remain until their natural expiry
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Insert a new unrevoked record
    async fn save(&self, record: RefreshTokenRecord) -> DomainResult<RefreshTokenRecord>;

    /// Look up a record by hash regardless of its revoked or expired state
    ///
    /// # Returns
    /// * `Ok(Some(record))` - A record with this hash exists
    /// * `Ok(None)` - No record with this hash
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_hash(&self, token_hash: &str) -> DomainResult<Option<RefreshTokenRecord>>;

    /// Mark one record revoked, stamping `revoked_at`
    ///
    /// # Returns
    /// * `Ok(true)` - This call flipped the flag
    /// * `Ok(false)` - Already revoked, or no such record
    ///
    /// Callers may treat `false` as losing a race: only one caller ever observes
    /// `true` for a given record.
    async fn revoke(&self, token_hash: &str) -> DomainResult<bool>;

    /// Revoke every unrevoked record of an account, returning how many flipped
    async fn revoke_all(&self, account_id: Uuid) -> DomainResult<u64>;

    /// Delete records with `expires_at < now`, returning how many were removed
    async fn cleanup(&self, now: DateTime<Utc>) -> DomainResult<u64>;

    /// Number of unrevoked, unexpired records for an account
    async fn count_active(&self, account_id: Uuid, now: DateTime<Utc>) -> DomainResult<u64>;

    /// Fetch a usable record
    ///
    /// # Returns
    /// * `Ok(record)` - Unrevoked and not past `expires_at`
    /// * `Err(TokenError::RefreshTokenNotFound)` - Absent or revoked
    /// * `Err(TokenError::TokenExpired)` - Present and unrevoked but expired
    async fn get(&self, token_hash: &str) -> DomainResult<RefreshTokenRecord> {
        let record = self
            .find_by_hash(token_hash)
            .await?
            .filter(|record| !record.is_revoked)
            .ok_or(TokenError::RefreshTokenNotFound)?;

        if record.is_expired() {
            return Err(TokenError::TokenExpired.into());
        }

        Ok(record)
    }
}
