//! One-way adaptive hashing of account passwords.

use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::warn;

use crate::errors::{DomainError, DomainResult};

const DUMMY_PASSWORD: &str = "tokengate-dummy-password";

/// Lowest work factor bcrypt accepts
pub const MIN_COST: u32 = 4;
/// Highest work factor bcrypt accepts
pub const MAX_COST: u32 = 31;

/// bcrypt wrapper with a bounded work factor
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// Hash compared against when no account matches, so both login failure
    /// paths pay for one bcrypt verification
    dummy_hash: Arc<OnceCell<String>>,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    /// Create a hasher; a cost outside bcrypt's `[4, 31]` range falls back to
    /// `bcrypt::DEFAULT_COST`
    pub fn new(cost: u32) -> Self {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            warn!(
                cost,
                default = bcrypt::DEFAULT_COST,
                "bcrypt cost out of range, using default"
            );
            return Self::default();
        }
        Self::with_cost(cost)
    }

    fn with_cost(cost: u32) -> Self {
        Self {
            cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password
    ///
    /// Any input is accepted, including the empty string; length and strength
    /// rules belong to the caller.
    pub fn hash(&self, plaintext: &str) -> DomainResult<String> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    /// Compare a plaintext password against a stored hash
    ///
    /// A malformed stored hash counts as a mismatch.
    pub fn verify(&self, hash: &str, plaintext: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }

    /// Spend the same work as [`verify`](Self::verify) without a real hash
    pub fn verify_dummy(&self, plaintext: &str) {
        let hash = self
            .dummy_hash
            .get_or_init(|| bcrypt::hash(DUMMY_PASSWORD, self.cost).unwrap_or_default());
        let _ = bcrypt::verify(plaintext, hash);
    }
}
