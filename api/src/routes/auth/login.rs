use actix_web::{web, HttpResponse, ResponseError};

use crate::dto::auth_dto::{validate_body, LoginRequest};
use crate::handlers::error::handle_domain_error;

use tg_core::repositories::{AccountRepository, RefreshTokenRepository, RevocationRepository};

use super::AppState;

/// Handler for POST /auth/login
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "9f86d0…",
///     "token_type": "Bearer",
///     "expires_in": 900,
///     "user": { "id": "…", "email": "alice@example.com", "role": "user", "created_at": "…" }
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Unknown email or wrong password (indistinguishable)
pub async fn login<A, R, V>(
    state: web::Data<AppState<A, R, V>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    R: RefreshTokenRepository + 'static,
    V: RevocationRepository + 'static,
{
    if let Err(e) = validate_body(&request.0) {
        return e.error_response();
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(error) => handle_domain_error(error),
    }
}
