use actix_web::{web, HttpResponse};

use crate::dto::auth_dto::LogoutResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use tg_core::repositories::{AccountRepository, RefreshTokenRepository, RevocationRepository};

use super::AppState;

/// Handler for POST /auth/logout
///
/// Blacklists the presented access token and revokes every refresh token of
/// the account. Requires `Authorization: Bearer {access_token}`; only the
/// signature and expiry are checked, so logging out twice succeeds.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "Logged out successfully" }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid or expired access token
pub async fn logout<A, R, V>(
    state: web::Data<AppState<A, R, V>>,
    auth: AuthContext,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    R: RefreshTokenRepository + 'static,
    V: RevocationRepository + 'static,
{
    match state.auth_service.logout(&auth.access_token).await {
        Ok(()) => HttpResponse::Ok().json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }),
        Err(error) => handle_domain_error(error),
    }
}
