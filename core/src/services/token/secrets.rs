//! Random identifiers and refresh secrets

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// 128 random bits rendered as 32 lowercase hex characters
pub fn generate_jti() -> String {
    random_hex::<16>()
}

/// 256 random bits rendered as 64 lowercase hex characters
pub fn generate_refresh_secret() -> String {
    random_hex::<32>()
}

/// SHA-256 of a refresh secret as lowercase hex; the only form that is stored
pub fn hash_refresh_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn random_hex<const N: usize>() -> String {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
