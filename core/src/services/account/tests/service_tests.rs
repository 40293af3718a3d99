//! Tests for the account service over the mock repository

use std::sync::Arc;
use uuid::Uuid;

use vc_shared::config::CredentialConfig;

use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::account::mock::MockAccountRepository;
use crate::services::account::config::AccountServiceConfig;
use crate::services::account::service::AccountService;

// Low bcrypt cost keeps the test suite fast; production uses the default
fn test_config() -> AccountServiceConfig {
    AccountServiceConfig {
        credentials: CredentialConfig {
            bcrypt_cost: 4,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn service() -> AccountService<MockAccountRepository> {
    AccountService::new(Arc::new(MockAccountRepository::new()), test_config())
}

#[tokio::test]
async fn test_register_normalizes_email() {
    let service = service();
    let account = service.register("  Alice@Example.COM ", "secret-pass").await.unwrap();

    assert_eq!(account.email, "alice@example.com");
    assert!(!account.is_verified);
    assert!(account.is_active);
    assert_ne!(account.credential_hash, "secret-pass");
}

#[tokio::test]
async fn test_register_rejects_bad_email() {
    let service = service();
    let result = service.register("not-an-email", "secret-pass").await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));
}

#[tokio::test]
async fn test_register_rejects_short_credential() {
    let service = service();
    let result = service.register("alice@example.com", "short").await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(
            ValidationError::InvalidCredentialLength { .. }
        ))
    ));
}

#[tokio::test]
async fn test_register_duplicate_is_case_insensitive() {
    let service = service();
    service.register("alice@example.com", "secret-pass").await.unwrap();

    let result = service.register("ALICE@EXAMPLE.COM", "other-pass").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DuplicateEmail))
    ));
}

#[tokio::test]
async fn test_register_inactive_policy() {
    let config = AccountServiceConfig {
        activate_on_register: false,
        ..test_config()
    };
    let service = AccountService::new(Arc::new(MockAccountRepository::new()), config);

    let account = service.register("alice@example.com", "secret-pass").await.unwrap();
    assert!(!account.is_active);
}

#[tokio::test]
async fn test_authenticate_success_records_login() {
    let service = service();
    service.register("alice@example.com", "secret-pass").await.unwrap();

    let account = service.authenticate("Alice@Example.com", "secret-pass").await.unwrap();
    assert!(account.last_login_at.is_some());
}

#[tokio::test]
async fn test_authenticate_uniform_failures() {
    let service = service();
    service.register("alice@example.com", "secret-pass").await.unwrap();

    // Wrong password and unknown email are indistinguishable
    let wrong_password = service.authenticate("alice@example.com", "wrong-pass").await;
    let unknown_email = service.authenticate("mallory@example.com", "secret-pass").await;

    assert!(matches!(
        wrong_password,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        unknown_email,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_authenticate_disabled_account() {
    let service = service();
    let account = service.register("alice@example.com", "secret-pass").await.unwrap();
    service.deactivate(account.id).await.unwrap();

    let result = service.authenticate("alice@example.com", "secret-pass").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AccountDisabled))
    ));
}

#[tokio::test]
async fn test_authenticate_verified_gate() {
    let config = AccountServiceConfig {
        require_verified_login: true,
        ..test_config()
    };
    let service = AccountService::new(Arc::new(MockAccountRepository::new()), config);
    let account = service.register("alice@example.com", "secret-pass").await.unwrap();

    let result = service.authenticate("alice@example.com", "secret-pass").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::VerificationRequired))
    ));

    service.mark_verified(account.id).await.unwrap();
    service.authenticate("alice@example.com", "secret-pass").await.unwrap();
}

#[tokio::test]
async fn test_mark_verified_is_idempotent() {
    let service = service();
    let account = service.register("alice@example.com", "secret-pass").await.unwrap();

    let first = service.mark_verified(account.id).await.unwrap();
    assert!(first.is_verified);

    // Second call must be a no-op success, not an error
    let second = service.mark_verified(account.id).await.unwrap();
    assert!(second.is_verified);
    assert_eq!(second.updated_at, first.updated_at);
}

#[tokio::test]
async fn test_mark_verified_unknown_account() {
    let service = service();
    let result = service.mark_verified(Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_apply_reset_rotates_credential() {
    let service = service();
    let account = service.register("alice@example.com", "old-secret").await.unwrap();
    service.mark_verified(account.id).await.unwrap();

    let updated = service.apply_reset(account.id, "new-secret-99").await.unwrap();

    // Verification status untouched by a credential change
    assert!(updated.is_verified);

    service.authenticate("alice@example.com", "new-secret-99").await.unwrap();
    let old = service.authenticate("alice@example.com", "old-secret").await;
    assert!(matches!(
        old,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_apply_reset_validates_credential() {
    let service = service();
    let account = service.register("alice@example.com", "old-secret").await.unwrap();

    let result = service.apply_reset(account.id, "x").await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(
            ValidationError::InvalidCredentialLength { .. }
        ))
    ));
}
