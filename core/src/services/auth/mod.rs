//! Authentication service module
//!
//! Registration, login, refresh-token rotation, logout and access-token
//! validation on top of the account, refresh-token and revocation stores.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
