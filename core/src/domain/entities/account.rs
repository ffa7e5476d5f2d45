//! Account entity: a registered identity that can log in with email and password.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::value_objects::AccountProfile;

/// Role assigned when registration does not name one
pub const DEFAULT_ROLE: &str = "user";

/// Registered account
///
/// Email is unique and compared case-sensitively. The password hash is never
/// serialized; use [`Account::profile`] for anything that leaves the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: Uuid,

    pub email: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Free-form role string, `"user"` by default
    pub role: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account with a fresh identifier
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>, role: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            role: role
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Public view of the account
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            email: self.email.clone(),
            role: self.role.clone(),
            created_at: self.created_at,
        }
    }
}
