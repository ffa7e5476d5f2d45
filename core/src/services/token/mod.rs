//! Access token codec and refresh secret helpers
//!
//! - RS256 signing and verification of strongly-typed access-token claims
//! - Random token identifiers and refresh secrets
//! - One-way hashing of refresh secrets for storage

mod codec;
mod secrets;


pub use codec::{MintedToken, ParsedToken, TokenCodec};
pub use secrets::{generate_jti, generate_refresh_secret, hash_refresh_secret};
