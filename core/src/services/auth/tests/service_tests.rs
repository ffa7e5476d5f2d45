//! Authentication service tests against in-memory stores

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use super::mocks::{config, harness, harness_with, BrokenRevocationRepository};
use crate::domain::entities::{RefreshTokenRecord, TOKEN_TYPE_BEARER};
use crate::errors::{AuthError, DomainError, ErrorKind, TokenError};
use crate::repositories::{
    AccountRepository, InMemoryRevocationRepository, RefreshTokenRepository, RevocationRepository,
};
use crate::services::token::hash_refresh_secret;

const EMAIL: &str = "alice@example.com";
const PASSWORD: &str = "Secret123";

fn kind<T: std::fmt::Debug>(result: Result<T, DomainError>) -> ErrorKind {
    result.expect_err("expected an error").kind()
}

// ---- register ----

#[tokio::test]
async fn test_register_persists_hashed_password() {
    let h = harness();

    let account = h.service.register(EMAIL, PASSWORD, None).await.unwrap();

    assert_eq!(account.email, EMAIL);
    assert_eq!(account.role, "user");
    assert_ne!(account.password_hash, PASSWORD);
    assert!(account.password_hash.starts_with("$2"));

    let stored = h.accounts.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(stored.id, account.id);
}

#[tokio::test]
async fn test_register_keeps_explicit_role() {
    let h = harness();
    let account = h
        .service
        .register(EMAIL, PASSWORD, Some("admin".to_string()))
        .await
        .unwrap();

    assert_eq!(account.role, "admin");
}

#[tokio::test]
async fn test_register_twice_is_email_exists() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD, None).await.unwrap();

    let second = h.service.register(EMAIL, "Another123", None).await;
    assert!(matches!(
        second,
        Err(DomainError::Auth(AuthError::EmailExists))
    ));
    assert_eq!(h.accounts.len().await, 1);
}

#[tokio::test]
async fn test_register_validates_input() {
    let h = harness();

    assert_eq!(
        kind(h.service.register("not-an-email", PASSWORD, None).await),
        ErrorKind::Validation
    );
    assert_eq!(
        kind(h.service.register(EMAIL, "short", None).await),
        ErrorKind::Validation
    );
    assert_eq!(h.accounts.len().await, 0);
}

// ---- login ----

#[tokio::test]
async fn test_register_then_login_then_validate() {
    let h = harness();
    let account = h.service.register(EMAIL, PASSWORD, None).await.unwrap();

    let outcome = h.service.login(EMAIL, PASSWORD).await.unwrap();
    assert_eq!(outcome.user.id, account.id);
    assert_eq!(outcome.user.email, EMAIL);
    assert_eq!(outcome.tokens.token_type, TOKEN_TYPE_BEARER);
    assert_eq!(outcome.tokens.expires_in, 900);
    assert_eq!(outcome.tokens.refresh_token.len(), 64);

    let claims = h
        .service
        .validate_token(&outcome.tokens.access_token)
        .await
        .unwrap();
    assert_eq!(claims.account_id().unwrap(), account.id);
    assert_eq!(claims.email, EMAIL);
    assert_eq!(claims.role, "user");
}

#[tokio::test]
async fn test_login_stores_only_refresh_hash() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD, None).await.unwrap();
    let outcome = h.service.login(EMAIL, PASSWORD).await.unwrap();

    let raw = &outcome.tokens.refresh_token;
    assert!(h.refresh_tokens.find_by_hash(raw).await.unwrap().is_none());

    let record = h
        .refresh_tokens
        .find_by_hash(&hash_refresh_secret(raw))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.account_id, outcome.user.id);
    let ttl = record.expires_at - Utc::now();
    assert!(ttl > chrono::Duration::days(6) && ttl <= chrono::Duration::days(7));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD, None).await.unwrap();

    let wrong_password = h.service.login(EMAIL, "Secret124").await;
    let unknown_email = h.service.login("bob@example.com", PASSWORD).await;
    let wrong_case = h.service.login("Alice@example.com", PASSWORD).await;

    for result in [wrong_password, unknown_email, wrong_case] {
        match result {
            Err(e) => {
                assert_eq!(e.kind(), ErrorKind::InvalidCredentials);
                assert_eq!(e.to_string(), "Invalid email or password");
            }
            Ok(_) => panic!("login should fail"),
        }
    }
}

// ---- refresh ----

#[tokio::test]
async fn test_refresh_rotates_and_old_token_is_single_use() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD, None).await.unwrap();
    let login = h.service.login(EMAIL, PASSWORD).await.unwrap();
    let original = login.tokens.refresh_token;

    let rotated = h.service.refresh_token(&original).await.unwrap();
    assert_ne!(rotated.refresh_token, original);
    assert_ne!(rotated.access_token, login.tokens.access_token);
    assert!(h.service.validate_token(&rotated.access_token).await.is_ok());

    // Reuse of the original now fails
    assert_eq!(
        kind(h.service.refresh_token(&original).await),
        ErrorKind::TokenRevoked
    );

    // The replacement works exactly once as well
    let again = h.service.refresh_token(&rotated.refresh_token).await.unwrap();
    assert_ne!(again.refresh_token, rotated.refresh_token);
}

#[tokio::test]
async fn test_refresh_unknown_token() {
    let h = harness();
    assert_eq!(
        kind(h.service.refresh_token("does-not-exist").await),
        ErrorKind::RefreshTokenNotFound
    );
}

#[tokio::test]
async fn test_refresh_expired_token() {
    let h = harness();
    let account = h.service.register(EMAIL, PASSWORD, None).await.unwrap();

    let secret = "expired-secret";
    h.refresh_tokens
        .save(RefreshTokenRecord::new(
            account.id,
            hash_refresh_secret(secret),
            Utc::now() - chrono::Duration::minutes(1),
        ))
        .await
        .unwrap();

    assert_eq!(
        kind(h.service.refresh_token(secret).await),
        ErrorKind::TokenExpired
    );
}

#[tokio::test]
async fn test_concurrent_refresh_has_one_winner() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD, None).await.unwrap();
    let secret = h.service.login(EMAIL, PASSWORD).await.unwrap().tokens.refresh_token;

    let (first, second) = tokio::join!(
        h.service.refresh_token(&secret),
        h.service.refresh_token(&secret)
    );

    let successes = [first.is_ok(), second.is_ok()]
        .iter()
        .filter(|ok| **ok)
        .count();
    assert_eq!(successes, 1);
    let failure = if first.is_err() { first } else { second };
    assert_eq!(kind(failure), ErrorKind::TokenRevoked);
}

#[tokio::test]
async fn test_refresh_for_deleted_account_still_burns_token() {
    let h = harness();
    let account = h.service.register(EMAIL, PASSWORD, None).await.unwrap();
    let secret = h.service.login(EMAIL, PASSWORD).await.unwrap().tokens.refresh_token;

    h.accounts.remove(account.id).await;

    assert_eq!(
        kind(h.service.refresh_token(&secret).await),
        ErrorKind::UserNotFound
    );
    let record = h
        .refresh_tokens
        .find_by_hash(&hash_refresh_secret(&secret))
        .await
        .unwrap()
        .unwrap();
    assert!(record.is_revoked);
}

// ---- logout ----

#[tokio::test]
async fn test_logout_revokes_access_token_and_all_refresh_tokens() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD, None).await.unwrap();
    let first_session = h.service.login(EMAIL, PASSWORD).await.unwrap().tokens;
    let second_session = h.service.login(EMAIL, PASSWORD).await.unwrap().tokens;

    h.service.logout(&first_session.access_token).await.unwrap();

    assert_eq!(
        kind(h.service.validate_token(&first_session.access_token).await),
        ErrorKind::TokenRevoked
    );
    // Other access tokens stay valid until they expire
    assert!(h
        .service
        .validate_token(&second_session.access_token)
        .await
        .is_ok());

    for refresh in [&first_session.refresh_token, &second_session.refresh_token] {
        let error = kind(h.service.refresh_token(refresh).await);
        assert!(matches!(
            error,
            ErrorKind::TokenRevoked | ErrorKind::RefreshTokenNotFound
        ));
    }
}

#[tokio::test]
async fn test_logout_records_token_expiry_in_ledger() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD, None).await.unwrap();
    let tokens = h.service.login(EMAIL, PASSWORD).await.unwrap().tokens;
    let claims = h.service.codec().decode(&tokens.access_token).unwrap();

    h.service.logout(&tokens.access_token).await.unwrap();
    // Logging out twice is harmless
    h.service.logout(&tokens.access_token).await.unwrap();

    assert_eq!(h.revocations.len().await, 1);
    let entry = h.revocations.entry(&claims.jti).await.unwrap();
    assert_eq!(entry.expires_at, claims.expires_at());
}

#[tokio::test]
async fn test_logout_rejects_malformed_token() {
    let h = harness();
    assert_eq!(
        kind(h.service.logout("garbage").await),
        ErrorKind::TokenInvalid
    );
    assert_eq!(h.revocations.len().await, 0);
}

#[tokio::test]
async fn test_logout_continues_when_ledger_fails() {
    let h = harness_with(BrokenRevocationRepository, config());
    h.service.register(EMAIL, PASSWORD, None).await.unwrap();
    let tokens = h.service.login(EMAIL, PASSWORD).await.unwrap().tokens;

    h.service.logout(&tokens.access_token).await.unwrap();

    assert_eq!(
        kind(h.service.refresh_token(&tokens.refresh_token).await),
        ErrorKind::TokenRevoked
    );
    // Validation cannot consult the ledger and fails closed
    assert!(h
        .service
        .validate_token(&tokens.access_token)
        .await
        .unwrap_err()
        .is_infrastructure());
}

// ---- validate ----

#[tokio::test]
async fn test_expired_access_token_fails_validation() {
    let mut config = config();
    config.access_token_ttl = Duration::from_nanos(1);
    let h = harness_with(InMemoryRevocationRepository::new(), config);
    h.service.register(EMAIL, PASSWORD, None).await.unwrap();

    let tokens = h.service.login(EMAIL, PASSWORD).await.unwrap().tokens;
    tokio::time::sleep(Duration::from_millis(10)).await;

    let error = kind(h.service.validate_token(&tokens.access_token).await);
    assert!(matches!(
        error,
        ErrorKind::TokenExpired | ErrorKind::TokenInvalid
    ));
}

#[tokio::test]
async fn test_validate_rejects_garbage() {
    let h = harness();
    assert_eq!(
        kind(h.service.validate_token("a.b.c").await),
        ErrorKind::TokenInvalid
    );
}

#[tokio::test]
async fn test_blacklist_checked_by_jti_only() {
    let h = harness();
    h.service.register(EMAIL, PASSWORD, None).await.unwrap();
    let tokens = h.service.login(EMAIL, PASSWORD).await.unwrap().tokens;
    let claims = h.service.codec().decode(&tokens.access_token).unwrap();

    h.revocations
        .add(&claims.jti, claims.expires_at())
        .await
        .unwrap();

    assert!(matches!(
        h.service.validate_token(&tokens.access_token).await,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));
}

// ---- current account ----

#[tokio::test]
async fn test_current_account() {
    let h = harness();
    let account = h.service.register(EMAIL, PASSWORD, None).await.unwrap();
    let tokens = h.service.login(EMAIL, PASSWORD).await.unwrap().tokens;
    let claims = h.service.validate_token(&tokens.access_token).await.unwrap();

    let current = h.service.current_account(&claims).await.unwrap();
    assert_eq!(current.id, account.id);

    h.accounts.remove(account.id).await;
    assert_eq!(
        kind(h.service.current_account(&claims).await),
        ErrorKind::UserNotFound
    );
}

#[tokio::test]
async fn test_service_is_shareable_across_tasks() {
    let h = harness();
    let service = Arc::new(h.service);
    service.register(EMAIL, PASSWORD, None).await.unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.login(EMAIL, PASSWORD).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
}
