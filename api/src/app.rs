//! Application factory
//!
//! Builds the Actix-web application from shared [`AppState`]. Used by
//! `main` and by the HTTP tests.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use crate::handlers::{health::health_check, ApiError};
use crate::middleware::auth::{JwtAuth, TokenValidator};
use crate::routes::auth::{
    login::login, logout::logout, me::me, refresh::refresh_token, register::register, AppState,
};

use tg_core::repositories::{AccountRepository, RefreshTokenRepository, RevocationRepository};
use tg_shared::{error_codes, ErrorResponse};

/// Create and configure the application with all dependencies
pub fn create_app<A, R, V>(
    app_state: web::Data<AppState<A, R, V>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + 'static,
    R: RefreshTokenRepository + 'static,
    V: RevocationRepository + 'static,
{
    let validator: Arc<dyn TokenValidator> = app_state.auth_service.clone();
    let jwt_auth = JwtAuth::new(Arc::clone(&validator));
    // Logout re-checks the token itself and must not depend on the ledger
    let logout_auth = JwtAuth::signature_only(validator);

    // Malformed JSON bodies get the same 400 shape as field validation
    let json_config = web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| ApiError::InvalidRequest(err.to_string()).into());

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(TracingLogger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(register::<A, R, V>))
                .route("/login", web::post().to(login::<A, R, V>))
                .route("/refresh", web::post().to(refresh_token::<A, R, V>))
                .service(
                    web::resource("/logout")
                        .wrap(logout_auth)
                        .route(web::post().to(logout::<A, R, V>)),
                )
                .service(
                    web::resource("/me")
                        .wrap(jwt_auth)
                        .route(web::get().to(me::<A, R, V>)),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(|| async {
            HttpResponse::NotFound().json(ErrorResponse::new(
                error_codes::NOT_FOUND,
                "The requested resource was not found",
            ))
        }))
}
