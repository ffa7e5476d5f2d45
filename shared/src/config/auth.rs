//! Authentication configuration: signing keys, token lifetimes, password hashing

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Smallest RSA modulus accepted for signing keys
pub const MIN_KEY_BITS: usize = 2048;

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Path to the PEM-encoded RSA private key
    pub private_key_path: String,

    /// Path to the PEM-encoded RSA public key
    pub public_key_path: String,

    /// Generate and persist a keypair at startup when neither file exists
    pub generate_keys_if_missing: bool,

    /// Modulus size for generated keys
    pub key_bits: usize,

    /// `iss` claim written into and required from access tokens
    pub issuer: String,

    /// Access token lifetime in seconds
    pub access_token_ttl_secs: u64,

    /// Refresh token lifetime in seconds
    pub refresh_token_ttl_secs: u64,

    /// bcrypt work factor
    pub bcrypt_cost: u32,

    /// Shortest password accepted at registration
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            private_key_path: String::from("keys/jwt_private_key.pem"),
            public_key_path: String::from("keys/jwt_public_key.pem"),
            generate_keys_if_missing: true,
            key_bits: MIN_KEY_BITS,
            issuer: String::from("tokengate"),
            access_token_ttl_secs: 900,     // 15 minutes
            refresh_token_ttl_secs: 604800, // 7 days
            bcrypt_cost: 12,
            min_password_length: 8,
        }
    }
}

impl AuthConfig {
    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_ttl_secs)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_ttl_secs)
    }
}
