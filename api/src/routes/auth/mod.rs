//! Authentication route handlers
//!
//! - Registration and password login
//! - Refresh-token rotation
//! - Logout and the current-account lookup (bearer-protected)

pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use tg_core::repositories::{AccountRepository, RefreshTokenRepository, RevocationRepository};
use tg_core::services::auth::AuthService;

/// Application state that holds shared services
pub struct AppState<A, R, V>
where
    A: AccountRepository,
    R: RefreshTokenRepository,
    V: RevocationRepository,
{
    pub auth_service: Arc<AuthService<A, R, V>>,
}

impl<A, R, V> AppState<A, R, V>
where
    A: AccountRepository,
    R: RefreshTokenRepository,
    V: RevocationRepository,
{
    pub fn new(auth_service: Arc<AuthService<A, R, V>>) -> Self {
        Self { auth_service }
    }
}
