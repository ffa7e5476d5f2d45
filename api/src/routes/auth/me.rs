use actix_web::{web, HttpResponse};

use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use tg_core::repositories::{AccountRepository, RefreshTokenRepository, RevocationRepository};

use super::AppState;

/// Handler for GET /auth/me
///
/// Returns the public profile of the token's account, or 401 if the account
/// no longer exists.
pub async fn me<A, R, V>(state: web::Data<AppState<A, R, V>>, auth: AuthContext) -> HttpResponse
where
    A: AccountRepository + 'static,
    R: RefreshTokenRepository + 'static,
    V: RevocationRepository + 'static,
{
    match state.auth_service.current_account(&auth.claims).await {
        Ok(account) => HttpResponse::Ok().json(account.profile()),
        Err(error) => handle_domain_error(error),
    }
}
