//! In-memory implementation of RevocationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RevokedAccessToken;
use crate::errors::DomainResult;

use super::r#trait::RevocationRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryRevocationRepository {
    entries: Arc<RwLock<HashMap<String, RevokedAccessToken>>>,
}

impl InMemoryRevocationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn entry(&self, jti: &str) -> Option<RevokedAccessToken> {
        self.entries.read().await.get(jti).cloned()
    }
}

#[async_trait]
impl RevocationRepository for InMemoryRevocationRepository {
    async fn add(&self, jti: &str, expires_at: DateTime<Utc>) -> DomainResult<()> {
        self.entries
            .write()
            .await
            .entry(jti.to_string())
            .or_insert_with(|| RevokedAccessToken::new(jti, expires_at));
        Ok(())
    }

    async fn contains(&self, jti: &str) -> DomainResult<bool> {
        Ok(self.entries.read().await.contains_key(jti))
    }

    async fn cleanup(&self, now: DateTime<Utc>) -> DomainResult<u64> {
        let mut entries = self.entries.write().await;
        let before = entries.len();

        entries.retain(|_, entry| !entry.is_expired_at(now));

        Ok((before - entries.len()) as u64)
    }
}
