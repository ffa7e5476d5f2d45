//! Shared utilities and common types for the TokenGate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and loading
//! - Error response structures
//! - Input validation helpers

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigValidationError, DatabaseConfig, Environment, LogFormat,
    LoggingConfig, ServerConfig, SweeperConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::validation;
