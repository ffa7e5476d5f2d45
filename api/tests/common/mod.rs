//! Shared wiring for HTTP tests: in-memory repositories and a generated keypair

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

use tg_api::routes::auth::AppState;
use tg_core::errors::{DomainError, DomainResult};
use tg_core::repositories::{
    InMemoryAccountRepository, InMemoryRefreshTokenRepository, InMemoryRevocationRepository,
    RevocationRepository,
};
use tg_core::services::{AuthService, AuthServiceConfig, KeyMaterial, PasswordHasher, TokenCodec};

pub type TestState<V = InMemoryRevocationRepository> =
    AppState<InMemoryAccountRepository, InMemoryRefreshTokenRepository, V>;

static KEYS: Lazy<Arc<KeyMaterial>> =
    Lazy::new(|| Arc::new(KeyMaterial::generate(2048).expect("generate test keypair")));

/// Revocation ledger whose every call fails, standing in for a database outage
pub struct UnavailableLedger;

#[async_trait]
impl RevocationRepository for UnavailableLedger {
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

pub fn test_state() -> web::Data<TestState> {
    test_state_with_access_ttl(Duration::from_secs(900))
}

pub fn test_state_with_access_ttl(access_token_ttl: Duration) -> web::Data<TestState> {
    build_state(Arc::new(InMemoryRevocationRepository::new()), access_token_ttl)
}

pub fn test_state_with_ledger<V: RevocationRepository + 'static>(
    revocations: Arc<V>,
) -> web::Data<TestState<V>> {
    build_state(revocations, Duration::from_secs(900))
}

fn build_state<V: RevocationRepository + 'static>(
    revocations: Arc<V>,
    access_token_ttl: Duration,
) -> web::Data<TestState<V>> {
    let config = AuthServiceConfig {
        access_token_ttl,
        ..AuthServiceConfig::default()
    };

    let auth_service = AuthService::new(
        Arc::new(InMemoryAccountRepository::new()),
        Arc::new(InMemoryRefreshTokenRepository::new()),
        revocations,
        Arc::new(TokenCodec::new(Arc::clone(&KEYS), "tokengate-test")),
        PasswordHasher::new(4),
        config,
    );

    web::Data::new(AppState::new(Arc::new(auth_service)))
}
