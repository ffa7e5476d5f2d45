//! Token entities: signed access-token claims, stored refresh-token records and
//! revocation ledger entries.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

/// `token_type` reported alongside every issued pair
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Claims carried by a signed access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Account id
    pub sub: String,

    pub email: String,

    pub role: String,

    /// Issuer
    pub iss: String,

    /// Unique token identifier, 128 random bits as hex
    pub jti: String,

    /// Issued at (seconds since epoch)
    pub iat: i64,

    /// Not valid before (seconds since epoch)
    pub nbf: i64,

    /// Expires at (seconds since epoch)
    pub exp: i64,
}

impl AccessTokenClaims {
    /// Parse the subject back into an account id
    pub fn account_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::TokenInvalid)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// A token is expired from its `exp` second onwards
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Stored refresh credential
///
/// Only the SHA-256 hash of the secret is kept. Revoked records stay in storage
/// until the sweeper removes them after `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    pub id: Uuid,

    pub account_id: Uuid,

    /// Hex SHA-256 of the raw secret
    pub token_hash: String,

    pub expires_at: DateTime<Utc>,

    pub is_revoked: bool,

    pub revoked_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Creates a new, unrevoked record
    pub fn new(account_id: Uuid, token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            token_hash,
            expires_at,
            is_revoked: false,
            revoked_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Neither revoked nor expired
    pub fn is_active(&self) -> bool {
        !self.is_revoked && !self.is_expired()
    }

    /// Flip the revoked flag; returns `false` if it was already set
    pub fn revoke(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_revoked {
            return false;
        }
        self.is_revoked = true;
        self.revoked_at = Some(now);
        true
    }
}

/// Revocation ledger entry for one access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokedAccessToken {
    pub jti: String,

    /// The token's own expiry; the entry is useless after this
    pub expires_at: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
}

impl RevokedAccessToken {
    pub fn new(jti: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            jti: jti.into(),
            expires_at,
            created_at: Utc::now(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Access and refresh token pair returned by login and refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,

    /// Raw refresh secret; only its hash is stored
    pub refresh_token: String,

    pub token_type: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
        }
    }
}
