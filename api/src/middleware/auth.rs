//! Bearer-token authentication middleware for protected endpoints.
//!
//! The middleware extracts the access token from the `Authorization` header,
//! runs it through [`TokenValidator`] and injects an [`AuthContext`] into the
//! request for handlers to extract. Rejections are answered directly with
//! the JSON error body.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use tg_core::{
    domain::entities::AccessTokenClaims,
    errors::DomainResult,
    repositories::{AccountRepository, RefreshTokenRepository, RevocationRepository},
    services::auth::AuthService,
};

use crate::handlers::ApiError;

/// Authenticated caller injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub account_id: Uuid,
    /// Verified claims of the presented token
    pub claims: AccessTokenClaims,
    /// The raw bearer token, needed to blacklist it on logout
    pub access_token: String,
}

impl AuthContext {
    /// Creates a new authentication context from validated claims
    pub fn from_claims(claims: AccessTokenClaims, access_token: String) -> DomainResult<Self> {
        let account_id = claims.account_id()?;
        Ok(Self {
            account_id,
            claims,
            access_token,
        })
    }
}

/// Access-token validation used by the middleware
///
/// Object-safe so the middleware does not carry the service's repository
/// type parameters.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Signature, expiry and revocation ledger
    async fn validate_token(&self, token: &str) -> DomainResult<AccessTokenClaims>;

    /// Signature and expiry only
    fn verify_signature(&self, token: &str) -> DomainResult<AccessTokenClaims>;
}

#[async_trait]
impl<A, R, V> TokenValidator for AuthService<A, R, V>
where
    A: AccountRepository,
    R: RefreshTokenRepository,
    V: RevocationRepository,
{
    async fn validate_token(&self, token: &str) -> DomainResult<AccessTokenClaims> {
        AuthService::validate_token(self, token).await
    }

    fn verify_signature(&self, token: &str) -> DomainResult<AccessTokenClaims> {
        self.codec().decode(token)
    }
}

/// How much of a token the middleware checks before admitting the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCheck {
    /// Signature, expiry and the revocation ledger
    Full,
    /// Signature and expiry; the ledger is not consulted
    SignatureOnly,
}

/// Bearer authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    validator: Arc<dyn TokenValidator>,
    check: TokenCheck,
}

impl JwtAuth {
    pub fn new(validator: Arc<dyn TokenValidator>) -> Self {
        Self {
            validator,
            check: TokenCheck::Full,
        }
    }

    /// Guard that skips the revocation ledger
    ///
    /// Used on logout, which must keep working while the ledger is down and
    /// accepts a token that was already logged out.
    pub fn signature_only(validator: Arc<dyn TokenValidator>) -> Self {
        Self {
            validator,
            check: TokenCheck::SignatureOnly,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            validator: Arc::clone(&self.validator),
            check: self.check,
        }))
    }
}

/// Bearer authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    validator: Arc<dyn TokenValidator>,
    check: TokenCheck,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let validator = Arc::clone(&self.validator);
        let check = self.check;

        Box::pin(async move {
            let Some(token) = extract_bearer_token(&req) else {
                return Ok(reject(req, ApiError::MissingToken));
            };

            let verified = match check {
                TokenCheck::Full => validator.validate_token(&token).await,
                TokenCheck::SignatureOnly => validator.verify_signature(&token),
            };

            match verified.and_then(|claims| AuthContext::from_claims(claims, token)) {
                Ok(auth_context) => {
                    req.extensions_mut().insert(auth_context);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(error) => Ok(reject(req, ApiError::from(error))),
            }
        })
    }
}

fn reject<B>(req: ServiceRequest, error: ApiError) -> ServiceResponse<EitherBody<B>> {
    req.into_response(error.error_response()).map_into_right_body()
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::MissingToken.into());

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_wrong_scheme = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_wrong_scheme), None);

        let req_empty = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }
}
