//! Business services containing domain logic and use cases.

pub mod auth;
pub mod keys;
pub mod password;
pub mod pkce;
pub mod sweeper;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use keys::{KeyMaterial, KeySource};
pub use password::PasswordHasher;
pub use pkce::CodeChallengeMethod;
pub use sweeper::{ExpirySweeper, SweepReport, SweeperHandle};
pub use token::TokenCodec;
