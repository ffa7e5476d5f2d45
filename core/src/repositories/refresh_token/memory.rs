//! In-memory implementation of RefreshTokenRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::RefreshTokenRepository;

/// Refresh token store keyed by token hash
#[derive(Debug, Clone, Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshTokenRecord>>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total records held, revoked ones included
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn save(&self, record: RefreshTokenRecord) -> DomainResult<RefreshTokenRecord> {
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&record.token_hash) {
            return Err(DomainError::internal("duplicate refresh token hash"));
        }

        tokens.insert(record.token_hash.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_hash(&self, token_hash: &str) -> DomainResult<Option<RefreshTokenRecord>> {
        Ok(self.tokens.read().await.get(token_hash).cloned())
    }

    async fn revoke(&self, token_hash: &str) -> DomainResult<bool> {
        let mut tokens = self.tokens.write().await;
        Ok(tokens
            .get_mut(token_hash)
            .map(|record| record.revoke(Utc::now()))
            .unwrap_or(false))
    }

    async fn revoke_all(&self, account_id: Uuid) -> DomainResult<u64> {
        let mut tokens = self.tokens.write().await;
        let now = Utc::now();

        let mut revoked = 0;
        for record in tokens.values_mut().filter(|r| r.account_id == account_id) {
            if record.revoke(now) {
                revoked += 1;
            }
        }

        Ok(revoked)
    }

    async fn cleanup(&self, now: DateTime<Utc>) -> DomainResult<u64> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();

        tokens.retain(|_, record| record.expires_at >= now);

        Ok((before - tokens.len()) as u64)
    }

    async fn count_active(&self, account_id: Uuid, now: DateTime<Utc>) -> DomainResult<u64> {
        let tokens = self.tokens.read().await;
        let count = tokens
            .values()
            .filter(|r| r.account_id == account_id && !r.is_revoked && !r.is_expired_at(now))
            .count();
        Ok(count as u64)
    }
}
