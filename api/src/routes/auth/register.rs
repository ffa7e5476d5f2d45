use actix_web::{web, HttpResponse, ResponseError};

use crate::dto::auth_dto::{validate_body, RegisterRequest};
use crate::handlers::error::handle_domain_error;

use tg_core::repositories::{AccountRepository, RefreshTokenRepository, RevocationRepository};

use super::AppState;

/// Handler for POST /auth/register
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com", "password": "Secret123", "role": "user" }
/// ```
///
/// `role` is optional and defaults to `"user"`.
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// { "id": "…", "email": "alice@example.com", "role": "user", "created_at": "…" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Malformed email or password outside the length policy
/// - 409 Conflict: Email already registered
pub async fn register<A, R, V>(
    state: web::Data<AppState<A, R, V>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    R: RefreshTokenRepository + 'static,
    V: RevocationRepository + 'static,
{
    if let Err(e) = validate_body(&request.0) {
        return e.error_response();
    }

    let RegisterRequest {
        email,
        password,
        role,
    } = request.into_inner();

    match state.auth_service.register(&email, &password, role).await {
        Ok(account) => HttpResponse::Created().json(account.profile()),
        Err(error) => handle_domain_error(error),
    }
}
