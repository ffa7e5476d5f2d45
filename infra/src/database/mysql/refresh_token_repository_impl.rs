//! MySQL implementation of the RefreshTokenRepository trait.
//!
//! Every mutation is one statement. Revocation is a conditional `UPDATE`
//! whose affected-row count tells the caller whether it won.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tg_core::domain::entities::RefreshTokenRecord;
use tg_core::errors::{DomainError, DomainResult};
use tg_core::repositories::RefreshTokenRepository;

use super::{is_unique_violation, parse_uuid, storage_error};

/// MySQL implementation of RefreshTokenRepository
pub struct MySqlRefreshTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRefreshTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshTokenRecord
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RefreshTokenRecord, DomainError> {
        let get_err =
            |e: sqlx::Error| DomainError::internal(format!("Failed to read refresh token row: {}", e));

        let id: String = row.try_get("id").map_err(get_err)?;
        let account_id: String = row.try_get("account_id").map_err(get_err)?;

        Ok(RefreshTokenRecord {
            id: parse_uuid("refresh_tokens.id", &id)?,
            account_id: parse_uuid("refresh_tokens.account_id", &account_id)?,
            token_hash: row.try_get("token_hash").map_err(get_err)?,
            expires_at: row.try_get::<DateTime<Utc>, _>("expires_at").map_err(get_err)?,
            is_revoked: row.try_get("is_revoked").map_err(get_err)?,
            revoked_at: row
                .try_get::<Option<DateTime<Utc>>, _>("revoked_at")
                .map_err(get_err)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(get_err)?,
        })
    }
}

#[async_trait]
impl RefreshTokenRepository for MySqlRefreshTokenRepository {
    async fn save(&self, record: RefreshTokenRecord) -> DomainResult<RefreshTokenRecord> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, account_id, token_hash, expires_at, is_revoked, revoked_at, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(record.id.to_string())
            .bind(record.account_id.to_string())
            .bind(&record.token_hash)
            .bind(record.expires_at)
            .bind(record.is_revoked)
            .bind(record.revoked_at)
            .bind(record.created_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(record),
            // A 256-bit secret colliding means something is badly wrong upstream
            Err(e) if is_unique_violation(&e) => {
                Err(DomainError::internal("Refresh token hash already stored"))
            }
            Err(e) => Err(storage_error("Failed to save refresh token", e)),
        }
    }

    async fn find_by_hash(&self, token_hash: &str) -> DomainResult<Option<RefreshTokenRecord>> {
        let query = r#"
            SELECT id, account_id, token_hash, expires_at, is_revoked, revoked_at, created_at
            FROM refresh_tokens
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find refresh token", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn revoke(&self, token_hash: &str) -> DomainResult<bool> {
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE, revoked_at = ?
            WHERE token_hash = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to revoke refresh token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke_all(&self, account_id: Uuid) -> DomainResult<u64> {
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE, revoked_at = ?
            WHERE account_id = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(account_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to revoke account refresh tokens", e))?;

        Ok(result.rows_affected())
    }

    async fn cleanup(&self, now: DateTime<Utc>) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete expired refresh tokens", e))?;

        Ok(result.rows_affected())
    }

    async fn count_active(&self, account_id: Uuid, now: DateTime<Utc>) -> DomainResult<u64> {
        let query = r#"
            SELECT COUNT(*) AS active
            FROM refresh_tokens
            WHERE account_id = ? AND is_revoked = FALSE AND expires_at > ?
        "#;

        let row = sqlx::query(query)
            .bind(account_id.to_string())
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to count active refresh tokens", e))?;

        let active: i64 = row
            .try_get("active")
            .map_err(|e| DomainError::internal(format!("Failed to read token count: {}", e)))?;
        Ok(u64::try_from(active).unwrap_or(0))
    }
}
