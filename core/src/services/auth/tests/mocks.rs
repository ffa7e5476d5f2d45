//! Test wiring for the authentication service

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::{DomainError, DomainResult};
use crate::repositories::{
    InMemoryAccountRepository, InMemoryRefreshTokenRepository, InMemoryRevocationRepository,
    RevocationRepository,
};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::password::{PasswordHasher, MIN_COST};
use crate::services::token::TokenCodec;
use crate::test_support::TEST_KEYS;

pub const ISSUER: &str = "tokengate-test";

pub type TestAuthService<V = InMemoryRevocationRepository> =
    AuthService<InMemoryAccountRepository, InMemoryRefreshTokenRepository, V>;

/// Service plus handles on its stores for assertions
pub struct Harness<V: RevocationRepository = InMemoryRevocationRepository> {
    pub service: TestAuthService<V>,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
    pub revocations: Arc<V>,
}

pub fn codec() -> Arc<TokenCodec> {
    Arc::new(TokenCodec::new(Arc::clone(&TEST_KEYS), ISSUER))
}

pub fn config() -> AuthServiceConfig {
    AuthServiceConfig {
        access_token_ttl: Duration::from_secs(900),
        refresh_token_ttl: Duration::from_secs(7 * 24 * 3600),
        min_password_length: 8,
    }
}

pub fn harness() -> Harness {
    harness_with(InMemoryRevocationRepository::new(), config())
}

pub fn harness_with<V: RevocationRepository>(revocations: V, config: AuthServiceConfig) -> Harness<V> {
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::new());
    let revocations = Arc::new(revocations);

    let service = AuthService::new(
        Arc::clone(&accounts),
        Arc::clone(&refresh_tokens),
        Arc::clone(&revocations),
        codec(),
        PasswordHasher::new(MIN_COST),
        config,
    );

    Harness {
        service,
        accounts,
        refresh_tokens,
        revocations,
    }
}

/// Ledger whose every call fails, for best-effort paths
#[derive(Default)]
pub struct BrokenRevocationRepository;

#[async_trait]
impl RevocationRepository for BrokenRevocationRepository {
    async fn add(&self, _jti: &str, _expires_at: DateTime<Utc>) -> DomainResult<()> {
        Err(DomainError::internal("ledger unavailable"))
    }

    async fn contains(&self, _jti: &str) -> DomainResult<bool> {
        Err(DomainError::internal("ledger unavailable"))
    }

    async fn cleanup(&self, _now: DateTime<Utc>) -> DomainResult<u64> {
        Err(DomainError::internal("ledger unavailable"))
    }
}
