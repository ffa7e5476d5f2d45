//! Domain entities representing core business objects.

pub mod account;
pub mod token;


// Re-export commonly used types
pub use account::{Account, DEFAULT_ROLE};
pub use token::{
    AccessTokenClaims, RefreshTokenRecord, RevokedAccessToken, TokenPair, TOKEN_TYPE_BEARER,
};
