//! Result of a successful login.

use serde::{Deserialize, Serialize};

use super::AccountProfile;
use crate::domain::entities::TokenPair;

/// Issued tokens together with the public view of the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginOutcome {
    #[serde(flatten)]
    pub tokens: TokenPair,

    pub user: AccountProfile,
}
