//! Main authentication service implementation

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::entities::{AccessTokenClaims, Account, RefreshTokenRecord, TokenPair};
use crate::domain::value_objects::LoginOutcome;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{AccountRepository, RefreshTokenRepository, RevocationRepository};
use crate::services::password::PasswordHasher;
use crate::services::token::{generate_refresh_secret, hash_refresh_secret, TokenCodec};
use tg_shared::validation::{is_valid_email, length_between};

use super::config::AuthServiceConfig;

/// Upper bound on password length; bcrypt ignores bytes past 72
const MAX_PASSWORD_LENGTH: usize = 128;

/// Authentication service orchestrating the token lifecycle
///
/// Refresh tokens move `Active -> Revoked -> Purged`. A successful refresh
/// revokes the presented token before minting its replacement, so every
/// refresh token is usable at most once.
///
/// Every method is safe to cancel between awaits: each storage write is a
/// single statement. A refresh cancelled after the old token is revoked but
/// before the new one is saved leaves the session logged out.
pub struct AuthService<A, R, V>
where
    A: AccountRepository,
    R: RefreshTokenRepository,
    V: RevocationRepository,
{
    /// Account storage
    accounts: Arc<A>,
    /// Hashed refresh token storage
    refresh_tokens: Arc<R>,
    /// Revoked access-token identifiers
    revocations: Arc<V>,
    /// RS256 access token codec
    codec: Arc<TokenCodec>,
    hasher: PasswordHasher,
    config: AuthServiceConfig,
}

impl<A, R, V> AuthService<A, R, V>
where
    A: AccountRepository,
    R: RefreshTokenRepository,
    V: RevocationRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `accounts` - Repository for account persistence
    /// * `refresh_tokens` - Repository for hashed refresh tokens
    /// * `revocations` - Revocation ledger for access tokens
    /// * `codec` - Access token codec holding the signing keys
    /// * `hasher` - Password hasher
    /// * `config` - Token lifetimes and password policy
    pub fn new(
        accounts: Arc<A>,
        refresh_tokens: Arc<R>,
        revocations: Arc<V>,
        codec: Arc<TokenCodec>,
        hasher: PasswordHasher,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            accounts,
            refresh_tokens,
            revocations,
            codec,
            hasher,
            config,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn config(&self) -> &AuthServiceConfig {
        &self.config
    }

    /// Register a new account
    ///
    /// # Arguments
    ///
    /// * `email` - Unique, case-sensitive login
    /// * `password` - Plaintext password, hashed before storage
    /// * `role` - Optional role, `"user"` when absent
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError::Auth(AuthError::EmailExists))` - Email already registered
    /// * `Err(DomainError::Validation)` - Malformed email or password too short
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use tg_core::repositories::*;
    /// # use tg_core::services::auth::AuthService;
    /// # async fn example(
    /// #     service: &AuthService<InMemoryAccountRepository, InMemoryRefreshTokenRepository, InMemoryRevocationRepository>,
    /// # ) -> Result<(), tg_core::errors::DomainError> {
    /// let account = service.register("alice@example.com", "Secret123", None).await?;
    /// assert_eq!(account.role, "user");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        role: Option<String>,
    ) -> DomainResult<Account> {
        // Step 1: Input policy
        if !is_valid_email(email) {
            return Err(DomainError::validation("email address is malformed"));
        }
        if !length_between(password, self.config.min_password_length, MAX_PASSWORD_LENGTH) {
            return Err(DomainError::validation(format!(
                "password must be between {} and {} characters",
                self.config.min_password_length, MAX_PASSWORD_LENGTH
            )));
        }

        // Step 2: Cheap duplicate check before paying for bcrypt
        if self.accounts.exists_by_email(email).await? {
            return Err(AuthError::EmailExists.into());
        }

        // Step 3: Hash and persist; the unique index still decides races
        let password_hash = self.hash_password(password).await?;
        let account = self
            .accounts
            .create(Account::new(email, password_hash, role))
            .await?;

        info!(account_id = %account.id, role = %account.role, "Account registered");
        Ok(account)
    }

    /// Authenticate with email and password
    ///
    /// Unknown email and wrong password both fail with `InvalidCredentials`
    /// after the same amount of hashing work.
    ///
    /// # Returns
    ///
    /// * `Ok(LoginOutcome)` - Access token, refresh token and public account info
    /// * `Err(DomainError::Auth(AuthError::InvalidCredentials))` - Authentication failed
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginOutcome> {
        let account = match self.accounts.find_by_email(email).await? {
            Some(account) => account,
            None => {
                self.verify_dummy_password(password).await?;
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.verify_password(&account.password_hash, password).await? {
            info!(account_id = %account.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let tokens = self.issue_tokens(&account).await?;
        info!(account_id = %account.id, "Login succeeded");

        Ok(LoginOutcome {
            tokens,
            user: account.profile(),
        })
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// The presented token is revoked before the replacement is minted and is
    /// never valid again, even if minting fails afterwards. Not idempotent:
    /// retrying with the same token fails with `TokenRevoked`.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Fresh access and refresh tokens
    /// * `Err(TokenError::RefreshTokenNotFound)` - Unknown token
    /// * `Err(TokenError::TokenRevoked)` - Already used, logged out, or lost a concurrent refresh
    /// * `Err(TokenError::TokenExpired)` - Past its expiry
    pub async fn refresh_token(&self, presented_secret: &str) -> DomainResult<TokenPair> {
        let token_hash = hash_refresh_secret(presented_secret);

        // Step 1: Look up in any state so revoked and unknown can be told apart
        let record = self
            .refresh_tokens
            .find_by_hash(&token_hash)
            .await?
            .ok_or(TokenError::RefreshTokenNotFound)?;

        if record.is_revoked {
            warn!(account_id = %record.account_id, "Revoked refresh token presented");
            return Err(TokenError::TokenRevoked.into());
        }
        if record.is_expired() {
            return Err(TokenError::TokenExpired.into());
        }

        // Step 2: Conditional revoke; only one concurrent caller sees `true`
        if !self.refresh_tokens.revoke(&token_hash).await? {
            warn!(account_id = %record.account_id, "Refresh token revoked concurrently");
            return Err(TokenError::TokenRevoked.into());
        }

        // Step 3: Mint the replacement pair
        let account = self
            .accounts
            .find_by_id(record.account_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let tokens = self.issue_tokens(&account).await?;
        info!(account_id = %account.id, "Refresh token rotated");
        Ok(tokens)
    }

    /// End every session of the token's account
    ///
    /// Blacklists the presented access token by `jti` and revokes all of the
    /// account's refresh tokens. Both writes are best effort: a failure is
    /// logged and the other still runs.
    pub async fn logout(&self, access_token: &str) -> DomainResult<()> {
        let claims = self.codec.decode(access_token)?;
        let account_id = claims.account_id()?;

        if let Err(e) = self.revocations.add(&claims.jti, claims.expires_at()).await {
            warn!(account_id = %account_id, jti = %claims.jti, error = %e, "Failed to blacklist access token");
        }

        match self.refresh_tokens.revoke_all(account_id).await {
            Ok(revoked) => {
                info!(account_id = %account_id, revoked_refresh_tokens = revoked, "Logged out");
            }
            Err(e) => {
                warn!(account_id = %account_id, error = %e, "Failed to revoke refresh tokens on logout");
            }
        }

        Ok(())
    }

    /// Verify an access token and check it has not been revoked
    ///
    /// # Returns
    ///
    /// * `Ok(AccessTokenClaims)` - Authentic, unexpired and not blacklisted
    /// * `Err(TokenError::TokenInvalid | TokenExpired)` - Failed verification
    /// * `Err(TokenError::TokenRevoked)` - Blacklisted by a logout
    pub async fn validate_token(&self, access_token: &str) -> DomainResult<AccessTokenClaims> {
        let claims = self.codec.decode(access_token)?;

        if self.revocations.contains(&claims.jti).await? {
            return Err(TokenError::TokenRevoked.into());
        }

        Ok(claims)
    }

    /// Load the account a validated token belongs to
    pub async fn current_account(&self, claims: &AccessTokenClaims) -> DomainResult<Account> {
        let account_id = claims.account_id()?;
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Mint an access token and persist a new refresh token
    async fn issue_tokens(&self, account: &Account) -> DomainResult<TokenPair> {
        let access = self.codec.mint(account, self.config.access_token_ttl)?;

        let refresh_secret = generate_refresh_secret();
        let refresh_ttl = chrono::Duration::from_std(self.config.refresh_token_ttl)
            .map_err(|e| DomainError::internal(format!("Refresh token TTL out of range: {}", e)))?;
        let record = RefreshTokenRecord::new(
            account.id,
            hash_refresh_secret(&refresh_secret),
            Utc::now() + refresh_ttl,
        );
        self.refresh_tokens.save(record).await?;

        let expires_in = i64::try_from(self.config.access_token_ttl.as_secs()).unwrap_or(i64::MAX);
        Ok(TokenPair::new(access.token, refresh_secret, expires_in))
    }

    // bcrypt is CPU-bound; keep it off the async worker threads

    async fn hash_password(&self, password: &str) -> DomainResult<String> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, hash: &str, password: &str) -> DomainResult<bool> {
        let hasher = self.hasher.clone();
        let hash = hash.to_owned();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&hash, &password))
            .await
            .map_err(|e| DomainError::internal(format!("Password verification task failed: {}", e)))
    }

    async fn verify_dummy_password(&self, password: &str) -> DomainResult<()> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify_dummy(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Password verification task failed: {}", e)))
    }
}
