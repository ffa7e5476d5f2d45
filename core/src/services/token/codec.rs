//! RS256 access token minting and verification

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use serde_json::{Map, Value};
use tracing::debug;

use super::secrets::generate_jti;
use crate::domain::entities::{AccessTokenClaims, Account};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::services::keys::KeyMaterial;

/// A freshly signed access token and the claims inside it
#[derive(Debug, Clone)]
pub struct MintedToken {
    pub token: String,
    pub claims: AccessTokenClaims,
}

/// A token whose signature, algorithm, issuer and lifetime have been checked
/// but whose claims have not yet been given a type
#[derive(Debug, Clone)]
pub struct ParsedToken {
    pub header: Header,
    pub claims: Map<String, Value>,
}

/// Signs access tokens with the private key and verifies them with the public key
///
/// Only RS256 is accepted on verification; tokens declaring any other
/// algorithm are rejected before signature checking.
pub struct TokenCodec {
    keys: Arc<KeyMaterial>,
    issuer: String,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("issuer", &self.issuer)
            .field("keys", &self.keys)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(keys: Arc<KeyMaterial>, issuer: impl Into<String>) -> Self {
        let issuer = issuer.into();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);

        Self {
            keys,
            issuer,
            validation,
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Sign an access token for `account` valid for `ttl`
    ///
    /// Timestamps are whole seconds, so a sub-second `ttl` yields a token that
    /// is already expired.
    pub fn mint(&self, account: &Account, ttl: Duration) -> DomainResult<MintedToken> {
        let now = Utc::now().timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

        let claims = AccessTokenClaims {
            sub: account.id.to_string(),
            email: account.email.clone(),
            role: account.role.clone(),
            iss: self.issuer.clone(),
            jti: generate_jti(),
            iat: now,
            nbf: now,
            exp: now.saturating_add(ttl_secs),
        };

        let token = encode(
            &Header::new(Algorithm::RS256),
            &claims,
            self.keys.encoding_key(),
        )
        .map_err(|e| DomainError::internal(format!("Failed to sign access token: {}", e)))?;

        Ok(MintedToken { token, claims })
    }

    /// Check signature, algorithm, issuer and expiry
    ///
    /// # Returns
    ///
    /// * `Ok(ParsedToken)` - Authentic and currently valid
    /// * `Err(TokenError::TokenExpired)` - Authentic but at or past `exp`
    /// * `Err(TokenError::TokenInvalid)` - Anything else
    pub fn verify(&self, token: &str) -> DomainResult<ParsedToken> {
        let data = decode::<Map<String, Value>>(token, self.keys.decoding_key(), &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Access token rejected");
                match e.kind() {
                    JwtErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    _ => TokenError::TokenInvalid,
                }
            })?;

        // jsonwebtoken still accepts a token during its `exp` second
        let exp = data
            .claims
            .get("exp")
            .and_then(Value::as_i64)
            .ok_or(TokenError::TokenInvalid)?;
        if Utc::now().timestamp() >= exp {
            return Err(TokenError::TokenExpired.into());
        }

        Ok(ParsedToken {
            header: data.header,
            claims: data.claims,
        })
    }

    /// Turn verified claims into [`AccessTokenClaims`]
    ///
    /// Fails with `TokenInvalid` when a claim is missing or has the wrong type.
    pub fn extract_claims(&self, parsed: ParsedToken) -> DomainResult<AccessTokenClaims> {
        let claims: AccessTokenClaims = serde_json::from_value(Value::Object(parsed.claims))
            .map_err(|e| {
                debug!(error = %e, "Access token claims malformed");
                TokenError::TokenInvalid
            })?;

        if claims.jti.is_empty() {
            return Err(TokenError::TokenInvalid.into());
        }
        claims.account_id()?;

        Ok(claims)
    }

    /// [`verify`](Self::verify) followed by [`extract_claims`](Self::extract_claims)
    pub fn decode(&self, token: &str) -> DomainResult<AccessTokenClaims> {
        let parsed = self.verify(token)?;
        self.extract_claims(parsed)
    }
}
