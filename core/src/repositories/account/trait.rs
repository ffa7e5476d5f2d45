//! Account repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainResult;

/// Persistence for [`Account`] records
///
/// Implementations must enforce email uniqueness atomically (unique index or
/// equivalent) and report a clash as `AuthError::EmailExists`.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError::Auth(AuthError::EmailExists))` - Email already taken
    /// * `Err(DomainError::Internal)` - Storage failure
    async fn create(&self, account: Account) -> DomainResult<Account>;

    /// Find an account by exact (case-sensitive) email
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Account>>;

    async fn exists_by_email(&self, email: &str) -> DomainResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
