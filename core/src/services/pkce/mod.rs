//! PKCE (RFC 7636) code verifier and challenge helpers

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::errors::{DomainError, DomainResult};

pub const MIN_VERIFIER_LEN: usize = 43;
pub const MAX_VERIFIER_LEN: usize = 128;

/// RFC 7636 unreserved characters
const VERIFIER_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

/// How a challenge is derived from its verifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeChallengeMethod {
    Plain,
    #[default]
    S256,
}

impl CodeChallengeMethod {
    /// Parse a method name; only the exact string `plain` selects `Plain`,
    /// everything else (including unknown names) selects `S256`
    pub fn parse(method: &str) -> Self {
        match method {
            "plain" => CodeChallengeMethod::Plain,
            _ => CodeChallengeMethod::S256,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CodeChallengeMethod::Plain => "plain",
            CodeChallengeMethod::S256 => "S256",
        }
    }
}

impl From<&str> for CodeChallengeMethod {
    fn from(method: &str) -> Self {
        Self::parse(method)
    }
}

impl fmt::Display for CodeChallengeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the challenge sent with the authorization request
///
/// `Plain` base64url-encodes the verifier bytes; `S256` base64url-encodes the
/// SHA-256 digest of the verifier. Both use the unpadded URL-safe alphabet.
pub fn generate_code_challenge(verifier: &str, method: CodeChallengeMethod) -> String {
    match method {
        CodeChallengeMethod::Plain => URL_SAFE_NO_PAD.encode(verifier.as_bytes()),
        CodeChallengeMethod::S256 => URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes())),
    }
}

/// Check that `verifier` produced `challenge` under `method`
pub fn validate_code_verifier(verifier: &str, challenge: &str, method: CodeChallengeMethod) -> bool {
    let expected = generate_code_challenge(verifier, method);
    constant_time_eq(expected.as_bytes(), challenge.as_bytes())
}

/// Random verifier of exactly `length` unreserved characters
///
/// # Returns
///
/// * `Ok(String)` - The verifier
/// * `Err(DomainError::Validation)` - `length` outside 43..=128
pub fn generate_code_verifier(length: usize) -> DomainResult<String> {
    if !(MIN_VERIFIER_LEN..=MAX_VERIFIER_LEN).contains(&length) {
        return Err(DomainError::validation(format!(
            "code verifier length must be between {} and {}, got {}",
            MIN_VERIFIER_LEN, MAX_VERIFIER_LEN, length
        )));
    }

    let mut rng = OsRng;
    let verifier: String = (0..length)
        .map(|_| VERIFIER_CHARSET[rng.gen_range(0..VERIFIER_CHARSET.len())] as char)
        .collect();
    Ok(verifier)
}
