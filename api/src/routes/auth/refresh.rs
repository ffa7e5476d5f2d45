use actix_web::{web, HttpResponse, ResponseError};

use crate::dto::auth_dto::{validate_body, RefreshTokenRequest};
use crate::handlers::error::handle_domain_error;

use tg_core::repositories::{AccountRepository, RefreshTokenRepository, RevocationRepository};

use super::AppState;

/// Handler for POST /auth/refresh
///
/// Exchanges a refresh token for a new access/refresh pair. The presented
/// refresh token is consumed; clients must not retry with it.
///
/// # Request Body
///
/// ```json
/// { "refresh_token": "string" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "new_refresh_token_string",
///     "token_type": "Bearer",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Unknown, expired or already-used refresh token
pub async fn refresh_token<A, R, V>(
    state: web::Data<AppState<A, R, V>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    R: RefreshTokenRepository + 'static,
    V: RevocationRepository + 'static,
{
    if let Err(e) = validate_body(&request.0) {
        return e.error_response();
    }

    match state.auth_service.refresh_token(&request.refresh_token).await {
        Ok(tokens) => HttpResponse::Ok().json(tokens),
        Err(error) => handle_domain_error(error),
    }
}
