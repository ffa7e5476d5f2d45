//! Configuration for the authentication service

use std::time::Duration;

use tg_shared::config::AuthConfig;

#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Lifetime of minted access tokens
    pub access_token_ttl: Duration,
    /// Lifetime of issued refresh tokens
    pub refresh_token_ttl: Duration,
    /// Shortest password accepted by `register`
    pub min_password_length: usize,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            access_token_ttl: Duration::from_secs(15 * 60),
            refresh_token_ttl: Duration::from_secs(7 * 24 * 60 * 60),
            min_password_length: 8,
        }
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            access_token_ttl: config.access_token_ttl(),
            refresh_token_ttl: config.refresh_token_ttl(),
            min_password_length: config.min_password_length,
        }
    }
}
