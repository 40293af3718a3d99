//! End-to-end tests for the authentication flows over mock collaborators

use std::sync::Arc;

use vc_shared::config::{CredentialConfig, SessionConfig};

use crate::domain::entities::verification_token::TokenPurpose;
use crate::errors::{AuthError, DomainError, TokenError, ValidationError};
use crate::repositories::account::mock::MockAccountRepository;
use crate::repositories::token::mock::MockTokenRepository;
use crate::services::account::{AccountService, AccountServiceConfig};
use crate::services::auth::config::AuthFlowConfig;
use crate::services::auth::service::AuthService;
use crate::services::session::SessionService;
use crate::services::token::{TokenService, TokenServiceConfig};

use super::mocks::MockNotificationGateway;

type TestAuthService =
    AuthService<MockAccountRepository, MockTokenRepository, MockNotificationGateway>;

struct Harness {
    service: TestAuthService,
    gateway: Arc<MockNotificationGateway>,
}

fn harness_with(flow: AuthFlowConfig) -> Harness {
    let account_config = AccountServiceConfig {
        credentials: CredentialConfig {
            bcrypt_cost: 4,
            ..Default::default()
        },
        ..Default::default()
    };
    let accounts = AccountService::new(Arc::new(MockAccountRepository::new()), account_config);
    let tokens = TokenService::new(Arc::new(MockTokenRepository::new()), TokenServiceConfig::default());
    let gateway = Arc::new(MockNotificationGateway::new());
    let sessions = SessionService::new(SessionConfig::new("test-secret"));

    Harness {
        service: AuthService::new(accounts, tokens, Arc::clone(&gateway), sessions, flow),
        gateway,
    }
}

fn harness() -> Harness {
    // No resend throttle by default; throttle tests opt in
    harness_with(AuthFlowConfig {
        min_resend_interval_seconds: 0,
        resend_throttle_enabled: false,
    })
}

#[tokio::test]
async fn test_register_sends_verification_message() {
    let h = harness();

    let result = h.service.register("Alice@Example.com", "secret-pass").await.unwrap();
    assert_eq!(result.email, "alice@example.com");
    assert!(result.verification_sent);

    let sent = h.gateway.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "alice@example.com");
    assert_eq!(sent[0].purpose, TokenPurpose::EmailVerify);
    assert_eq!(sent[0].account_id, result.account_id);
    assert!(!sent[0].raw_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let h = harness();
    h.service.register("a@x.com", "secret-one").await.unwrap();

    let result = h.service.register("a@x.com", "secret-two").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DuplicateEmail))
    ));
    assert_eq!(h.gateway.sent_count().await, 1);
}

#[tokio::test]
async fn test_verify_email_then_replay() {
    let h = harness();
    let registered = h.service.register("a@x.com", "secret-pass").await.unwrap();
    let raw = h.gateway.last_raw_token().await;

    let verified_id = h.service.verify_email(&raw).await.unwrap();
    assert_eq!(verified_id, registered.account_id);

    // Same link a second time: uniform rejection, not a distinct reason
    let replay = h.service.verify_email(&raw).await;
    assert!(matches!(
        replay,
        Err(DomainError::Token(TokenError::InvalidOrExpired))
    ));
}

#[tokio::test]
async fn test_verify_email_unknown_token_is_uniform() {
    let h = harness();
    let result = h.service.verify_email("no-such-token").await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidOrExpired))
    ));
}

#[tokio::test]
async fn test_verify_email_rejects_reset_token() {
    let h = harness();
    h.service.register("a@x.com", "secret-pass").await.unwrap();
    h.service.request_password_reset("a@x.com").await.unwrap();
    let reset_raw = h.gateway.last_raw_token().await;

    // Wrong-purpose presentation collapses to the same uniform error
    let result = h.service.verify_email(&reset_raw).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidOrExpired))
    ));

    // And the reset token survives the failed attempt
    h.service
        .apply_password_reset(&reset_raw, "new-secret-99")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_resend_unknown_email_is_uniform_success() {
    let h = harness();
    h.service.resend_verification("ghost@x.com").await.unwrap();
    assert_eq!(h.gateway.sent_count().await, 0);
}

#[tokio::test]
async fn test_resend_already_verified_is_noop() {
    let h = harness();
    h.service.register("a@x.com", "secret-pass").await.unwrap();
    let raw = h.gateway.last_raw_token().await;
    h.service.verify_email(&raw).await.unwrap();

    h.service.resend_verification("a@x.com").await.unwrap();
    assert_eq!(h.gateway.sent_count().await, 1, "no new message for verified account");
}

#[tokio::test]
async fn test_resend_supersedes_previous_token() {
    let h = harness();
    h.service.register("a@x.com", "secret-pass").await.unwrap();
    let first_raw = h.gateway.last_raw_token().await;

    h.service.resend_verification("a@x.com").await.unwrap();
    let second_raw = h.gateway.last_raw_token().await;
    assert_ne!(first_raw, second_raw);

    let stale = h.service.verify_email(&first_raw).await;
    assert!(matches!(
        stale,
        Err(DomainError::Token(TokenError::InvalidOrExpired))
    ));

    h.service.verify_email(&second_raw).await.unwrap();
}

#[tokio::test]
async fn test_resend_throttled_within_interval() {
    let h = harness_with(AuthFlowConfig {
        min_resend_interval_seconds: 3600,
        resend_throttle_enabled: true,
    });
    h.service.register("a@x.com", "secret-pass").await.unwrap();

    let result = h.service.resend_verification("a@x.com").await;
    match result {
        Err(DomainError::Auth(AuthError::RateLimitExceeded { seconds })) => {
            assert!(seconds > 0 && seconds <= 3600);
        }
        other => panic!("expected rate limit error, got {:?}", other),
    }
    assert_eq!(h.gateway.sent_count().await, 1);
}

#[tokio::test]
async fn test_reset_request_unknown_email_is_uniform_success() {
    let h = harness();
    h.service.request_password_reset("ghost@x.com").await.unwrap();
    assert_eq!(h.gateway.sent_count().await, 0);
}

#[tokio::test]
async fn test_reset_request_twice_only_newest_works() {
    let h = harness();
    h.service.register("a@x.com", "secret-pass").await.unwrap();

    h.service.request_password_reset("a@x.com").await.unwrap();
    let sent = h.gateway.sent().await;
    let first_raw = sent.last().unwrap().raw_token.clone();

    h.service.request_password_reset("a@x.com").await.unwrap();
    let second_raw = h.gateway.last_raw_token().await;
    assert_ne!(first_raw, second_raw);

    let stale = h.service.apply_password_reset(&first_raw, "new-secret-99").await;
    assert!(matches!(
        stale,
        Err(DomainError::Token(TokenError::InvalidOrExpired))
    ));

    h.service
        .apply_password_reset(&second_raw, "new-secret-99")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_reset_rotates_credential_for_login() {
    let h = harness();
    h.service.register("a@x.com", "old-secret-1").await.unwrap();
    h.service.request_password_reset("a@x.com").await.unwrap();
    let raw = h.gateway.last_raw_token().await;

    h.service.apply_password_reset(&raw, "new-secret-2").await.unwrap();

    h.service.login("a@x.com", "new-secret-2").await.unwrap();
    let old = h.service.login("a@x.com", "old-secret-1").await;
    assert!(matches!(
        old,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_reset_revokes_outstanding_verification_token() {
    let h = harness();
    h.service.register("a@x.com", "secret-pass").await.unwrap();
    let verify_raw = h.gateway.last_raw_token().await;

    h.service.request_password_reset("a@x.com").await.unwrap();
    let reset_raw = h.gateway.last_raw_token().await;

    h.service
        .apply_password_reset(&reset_raw, "new-secret-99")
        .await
        .unwrap();

    // The verification link mailed before the reset is dead
    let result = h.service.verify_email(&verify_raw).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidOrExpired))
    ));
}

#[tokio::test]
async fn test_reset_with_bad_credential_keeps_token() {
    let h = harness();
    h.service.register("a@x.com", "secret-pass").await.unwrap();
    h.service.request_password_reset("a@x.com").await.unwrap();
    let raw = h.gateway.last_raw_token().await;

    // Policy failure must not burn the single-use link
    let rejected = h.service.apply_password_reset(&raw, "x").await;
    assert!(matches!(
        rejected,
        Err(DomainError::ValidationErr(
            ValidationError::InvalidCredentialLength { .. }
        ))
    ));

    h.service.apply_password_reset(&raw, "new-secret-99").await.unwrap();
}

#[tokio::test]
async fn test_delivery_failure_does_not_roll_back() {
    let h = harness();
    h.gateway.set_failing(true);

    let result = h.service.register("a@x.com", "secret-pass").await.unwrap();
    assert!(!result.verification_sent);

    // Account and token exist: once the gateway recovers, resend works
    h.gateway.set_failing(false);
    h.service.resend_verification("a@x.com").await.unwrap();
    let raw = h.gateway.last_raw_token().await;
    h.service.verify_email(&raw).await.unwrap();
}

#[tokio::test]
async fn test_login_issues_session() {
    let h = harness();
    let registered = h.service.register("a@x.com", "secret-pass").await.unwrap();

    let response = h.service.login("a@x.com", "secret-pass").await.unwrap();
    assert_eq!(response.account_id, registered.account_id);
    assert!(response.requires_verification);

    let claims = h.service.verify_session(&response.token).unwrap();
    assert_eq!(claims.account_id().unwrap(), registered.account_id);

    // After verification the session reflects the new status
    let raw = h.gateway.last_raw_token().await;
    h.service.verify_email(&raw).await.unwrap();
    let response = h.service.login("a@x.com", "secret-pass").await.unwrap();
    assert!(!response.requires_verification);
}

#[tokio::test]
async fn test_login_uniform_failures() {
    let h = harness();
    h.service.register("a@x.com", "secret-pass").await.unwrap();

    let wrong = h.service.login("a@x.com", "wrong-pass").await;
    let unknown = h.service.login("ghost@x.com", "secret-pass").await;
    assert!(matches!(
        wrong,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        unknown,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}
