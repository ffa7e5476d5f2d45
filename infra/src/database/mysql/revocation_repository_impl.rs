//! MySQL implementation of the RevocationRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use tg_core::errors::DomainResult;
use tg_core::repositories::RevocationRepository;

use super::storage_error;

/// Revoked access-token identifiers in `revoked_access_tokens`
pub struct MySqlRevocationRepository {
    pool: MySqlPool,
}

impl MySqlRevocationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevocationRepository for MySqlRevocationRepository {
    async fn add(&self, jti: &str, expires_at: DateTime<Utc>) -> DomainResult<()> {
        // INSERT IGNORE keeps the first entry when a jti is revoked twice
        let query = r#"
            INSERT IGNORE INTO revoked_access_tokens (jti, expires_at, created_at)
            VALUES (?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(jti)
            .bind(expires_at)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to record revoked access token", e))?;

        Ok(())
    }

    async fn contains(&self, jti: &str) -> DomainResult<bool> {
        let row = sqlx::query("SELECT 1 FROM revoked_access_tokens WHERE jti = ? LIMIT 1")
            .bind(jti)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to check revoked access token", e))?;

        Ok(row.is_some())
    }

    async fn cleanup(&self, now: DateTime<Utc>) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM revoked_access_tokens WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete expired revocation entries", e))?;

        Ok(result.rows_affected())
    }
}
