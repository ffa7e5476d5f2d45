//! Value objects representing immutable domain concepts.

pub mod account_profile;
pub mod login_outcome;

pub use account_profile::AccountProfile;
pub use login_outcome::LoginOutcome;
