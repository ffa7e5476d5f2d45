//! Mapping from domain errors to HTTP responses
//!
//! Every error body is a [`ErrorResponse`]. Infrastructure failures are
//! logged in full and rendered as a generic `internal_error`.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::{debug, error};

use tg_core::errors::{DomainError, ErrorKind};
use tg_shared::{error_codes, ErrorResponse};

/// Errors produced by the HTTP layer
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No usable `Authorization: Bearer` header
    #[error("Missing or malformed Authorization header")]
    MissingToken,

    /// Request body failed extraction or field validation
    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    /// Stable error code for the response body
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingToken => error_codes::MISSING_TOKEN,
            ApiError::InvalidRequest(_) => error_codes::VALIDATION_ERROR,
            ApiError::Domain(e) => match e.kind() {
                ErrorKind::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
                ErrorKind::EmailExists => error_codes::EMAIL_EXISTS,
                ErrorKind::UserNotFound => error_codes::USER_NOT_FOUND,
                ErrorKind::TokenExpired => error_codes::TOKEN_EXPIRED,
                ErrorKind::TokenInvalid => error_codes::TOKEN_INVALID,
                ErrorKind::TokenRevoked => error_codes::TOKEN_REVOKED,
                ErrorKind::RefreshTokenNotFound => error_codes::REFRESH_TOKEN_NOT_FOUND,
                ErrorKind::Validation => error_codes::VALIDATION_ERROR,
                ErrorKind::Infrastructure => error_codes::INTERNAL_ERROR,
            },
        }
    }

    /// Client-facing message; never includes infrastructure detail
    fn public_message(&self) -> String {
        match self {
            ApiError::Domain(e) if e.is_infrastructure() => {
                String::from("An internal error occurred")
            }
            other => other.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(e) => match e.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::EmailExists => StatusCode::CONFLICT,
                ErrorKind::InvalidCredentials
                | ErrorKind::UserNotFound
                | ErrorKind::TokenExpired
                | ErrorKind::TokenInvalid
                | ErrorKind::TokenRevoked
                | ErrorKind::RefreshTokenNotFound => StatusCode::UNAUTHORIZED,
                ErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            debug!(code = self.code(), "Request rejected");
        }

        HttpResponse::build(status).json(ErrorResponse::new(self.code(), self.public_message()))
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    ApiError::from(error).error_response()
}
