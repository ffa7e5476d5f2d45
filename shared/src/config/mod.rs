//! Configuration module with business-specific sub-modules
//!
//! - `auth` - key material, token lifetimes and password hashing
//! - `database` - MySQL connection pool
//! - `environment` - environment detection and logging
//! - `server` - HTTP server binding
//! - `sweeper` - background expiry cleanup

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;
pub mod sweeper;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthConfig, MIN_KEY_BITS};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use sweeper::SweeperConfig;

/// Prefix for environment variable overrides, e.g. `APP_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "APP";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub sweeper: SweeperConfig,
    pub logging: LoggingConfig,
}

/// Reasons a loaded configuration is refused at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("auth.key_bits must be at least {min}, got {actual}")]
    KeyTooSmall { min: usize, actual: usize },

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("sweeper.tick_timeout_secs ({timeout}) must be shorter than sweeper.interval_secs ({interval})")]
    SweeperTimeoutTooLong { timeout: u64, interval: u64 },
}

impl AppConfig {
    /// Load configuration from defaults, optional TOML files and `APP_*` variables.
    ///
    /// Sources, later ones winning:
    /// 1. compiled defaults
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml`
    /// 4. environment variables (`APP_AUTH__ISSUER`, `APP_DATABASE__URL`, ...)
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name("config/default").required(false))
            .add_source(
                ::config::File::with_name(&format!("config/{}", environment)).required(false),
            )
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;
        config.environment = environment;
        Ok(config)
    }

    /// Check cross-field constraints that serde defaults cannot express
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.auth.key_bits < MIN_KEY_BITS {
            return Err(ConfigValidationError::KeyTooSmall {
                min: MIN_KEY_BITS,
                actual: self.auth.key_bits,
            });
        }
        if self.auth.access_token_ttl_secs == 0 {
            return Err(ConfigValidationError::ZeroDuration {
                field: "auth.access_token_ttl_secs",
            });
        }
        if self.auth.refresh_token_ttl_secs == 0 {
            return Err(ConfigValidationError::ZeroDuration {
                field: "auth.refresh_token_ttl_secs",
            });
        }
        if self.sweeper.interval_secs == 0 {
            return Err(ConfigValidationError::ZeroDuration {
                field: "sweeper.interval_secs",
            });
        }
        if self.sweeper.tick_timeout_secs >= self.sweeper.interval_secs {
            return Err(ConfigValidationError::SweeperTimeoutTooLong {
                timeout: self.sweeper.tick_timeout_secs,
                interval: self.sweeper.interval_secs,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.auth.access_token_ttl_secs, 900);
        assert_eq!(config.auth.refresh_token_ttl_secs, 604_800);
        assert_eq!(config.sweeper.interval_secs, 3600);
        assert_eq!(config.sweeper.tick_timeout_secs, 30);
    }

    #[test]
    fn test_rejects_weak_key_size() {
        let mut config = AppConfig::default();
        config.auth.key_bits = 1024;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::KeyTooSmall {
                min: 2048,
                actual: 1024
            })
        );
    }

    #[test]
    fn test_rejects_zero_ttl() {
        let mut config = AppConfig::default();
        config.auth.refresh_token_ttl_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::ZeroDuration { .. })
        ));
    }

    #[test]
    fn test_rejects_tick_timeout_longer_than_interval() {
        let mut config = AppConfig::default();
        config.sweeper.interval_secs = 10;
        config.sweeper.tick_timeout_secs = 30;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::SweeperTimeoutTooLong { .. })
        ));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from_str(
                "[auth]\nissuer = \"example\"\n\n[server]\nport = 9000\n",
                ::config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: AppConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.auth.issuer, "example");
        assert_eq!(config.auth.access_token_ttl_secs, 900);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
