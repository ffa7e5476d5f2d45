//! MySQL implementation of the AccountRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tg_core::domain::entities::Account;
use tg_core::errors::{AuthError, DomainError, DomainResult};
use tg_core::repositories::AccountRepository;

use super::{is_unique_violation, parse_uuid, storage_error};

const SELECT_COLUMNS: &str = "SELECT id, email, password_hash, role, created_at, updated_at FROM accounts";

/// MySQL implementation of AccountRepository
///
/// Email uniqueness is enforced by `uk_accounts_email`; a clash on insert is
/// reported as `EmailExists` regardless of any earlier existence check.
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let get_err = |e: sqlx::Error| DomainError::internal(format!("Failed to read account row: {}", e));

        let id: String = row.try_get("id").map_err(get_err)?;

        Ok(Account {
            id: parse_uuid("accounts.id", &id)?,
            email: row.try_get("email").map_err(get_err)?,
            password_hash: row.try_get("password_hash").map_err(get_err)?,
            role: row.try_get("role").map_err(get_err)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(get_err)?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at").map_err(get_err)?,
        })
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn create(&self, account: Account) -> DomainResult<Account> {
        let query = r#"
            INSERT INTO accounts (id, email, password_hash, role, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(&account.role)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(account),
            Err(e) if is_unique_violation(&e) => Err(AuthError::EmailExists.into()),
            Err(e) => Err(storage_error("Failed to create account", e)),
        }
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let query = format!("{} WHERE email = ? LIMIT 1", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find account by email", e))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Account>> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find account by id", e))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> DomainResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = ?) AS found")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to check account existence", e))?;

        let found: i64 = row
            .try_get("found")
            .map_err(|e| DomainError::internal(format!("Failed to read existence result: {}", e)))?;
        Ok(found == 1)
    }
}
