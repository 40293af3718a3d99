//! Tests for the token service over the mock repository

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::verification_token::TokenPurpose;
use crate::errors::{DomainError, TokenError};
use crate::repositories::token::mock::MockTokenRepository;
use crate::services::token::config::TokenServiceConfig;
use crate::services::token::service::TokenService;

fn service() -> TokenService<MockTokenRepository> {
    TokenService::new(Arc::new(MockTokenRepository::new()), TokenServiceConfig::default())
}

fn service_with_ttls(verify_ttl: i64, reset_ttl: i64) -> TokenService<MockTokenRepository> {
    TokenService::new(
        Arc::new(MockTokenRepository::new()),
        TokenServiceConfig {
            email_verify_ttl_seconds: verify_ttl,
            password_reset_ttl_seconds: reset_ttl,
        },
    )
}

#[tokio::test]
async fn test_issue_and_redeem_round_trip() {
    let service = service();
    let account_id = Uuid::new_v4();

    let issued = service.issue(account_id, TokenPurpose::EmailVerify).await.unwrap();
    assert_ne!(issued.raw, issued.token.token_hash);

    let consumed = service
        .validate_and_consume(&issued.raw, TokenPurpose::EmailVerify)
        .await
        .unwrap();
    assert_eq!(consumed.account_id, account_id);
    assert!(consumed.consumed);
}

#[tokio::test]
async fn test_redeem_twice_fails() {
    let service = service();
    let issued = service
        .issue(Uuid::new_v4(), TokenPurpose::EmailVerify)
        .await
        .unwrap();

    service
        .validate_and_consume(&issued.raw, TokenPurpose::EmailVerify)
        .await
        .unwrap();

    let result = service
        .validate_and_consume(&issued.raw, TokenPurpose::EmailVerify)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::AlreadyConsumed))
    ));
}

#[tokio::test]
async fn test_unknown_raw_token() {
    let service = service();
    let result = service
        .validate_and_consume("definitely-not-a-token", TokenPurpose::EmailVerify)
        .await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::NotFound))));
}

#[tokio::test]
async fn test_purpose_is_enforced() {
    let service = service();
    let issued = service
        .issue(Uuid::new_v4(), TokenPurpose::PasswordReset)
        .await
        .unwrap();

    let result = service
        .validate_and_consume(&issued.raw, TokenPurpose::EmailVerify)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::PurposeMismatch))
    ));

    // The failed attempt must not have consumed the token
    let consumed = service
        .validate_and_consume(&issued.raw, TokenPurpose::PasswordReset)
        .await
        .unwrap();
    assert!(consumed.consumed);
}

#[tokio::test]
async fn test_second_issue_invalidates_first_raw() {
    let service = service();
    let account_id = Uuid::new_v4();

    let first = service.issue(account_id, TokenPurpose::EmailVerify).await.unwrap();
    let second = service.issue(account_id, TokenPurpose::EmailVerify).await.unwrap();

    let result = service
        .validate_and_consume(&first.raw, TokenPurpose::EmailVerify)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::AlreadyConsumed))
    ));

    service
        .validate_and_consume(&second.raw, TokenPurpose::EmailVerify)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_expired_token_rejected() {
    // Zero TTL: expired the instant it is issued
    let service = service_with_ttls(0, 0);
    let issued = service
        .issue(Uuid::new_v4(), TokenPurpose::EmailVerify)
        .await
        .unwrap();

    let result = service
        .validate_and_consume(&issued.raw, TokenPurpose::EmailVerify)
        .await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::Expired))));
}

#[tokio::test]
async fn test_purpose_specific_ttls() {
    let service = service_with_ttls(86400, 3600);
    let account_id = Uuid::new_v4();

    let verify = service.issue(account_id, TokenPurpose::EmailVerify).await.unwrap();
    let reset = service.issue(account_id, TokenPurpose::PasswordReset).await.unwrap();

    let verify_ttl = verify.token.expires_at - verify.token.created_at;
    let reset_ttl = reset.token.expires_at - reset.token.created_at;
    assert_eq!(verify_ttl.num_seconds(), 86400);
    assert_eq!(reset_ttl.num_seconds(), 3600);
}

#[tokio::test]
async fn test_seconds_since_last_issue() {
    let service = service();
    let account_id = Uuid::new_v4();

    assert_eq!(
        service
            .seconds_since_last_issue(account_id, TokenPurpose::EmailVerify)
            .await
            .unwrap(),
        None
    );

    service.issue(account_id, TokenPurpose::EmailVerify).await.unwrap();

    let age = service
        .seconds_since_last_issue(account_id, TokenPurpose::EmailVerify)
        .await
        .unwrap()
        .expect("a token was just issued");
    assert!((0..5).contains(&age));

    // Other purposes are tracked separately
    assert_eq!(
        service
            .seconds_since_last_issue(account_id, TokenPurpose::PasswordReset)
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_revoke_all() {
    let service = service();
    let account_id = Uuid::new_v4();

    let verify = service.issue(account_id, TokenPurpose::EmailVerify).await.unwrap();
    let reset = service.issue(account_id, TokenPurpose::PasswordReset).await.unwrap();

    let revoked = service.revoke_all(account_id).await.unwrap();
    assert_eq!(revoked, 2);

    for (raw, purpose) in [
        (verify.raw, TokenPurpose::EmailVerify),
        (reset.raw, TokenPurpose::PasswordReset),
    ] {
        let result = service.validate_and_consume(&raw, purpose).await;
        assert!(matches!(
            result,
            Err(DomainError::Token(TokenError::AlreadyConsumed))
        ));
    }
}
