//! Account service implementation.

use std::sync::Arc;
use uuid::Uuid;

use vc_shared::utils::validation::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::AccountRepository;

use super::config::AccountServiceConfig;

// bcrypt hash compared against when no account matches the email, so the
// unknown-email path pays the same hashing cost as the wrong-password path.
const PHANTOM_CREDENTIAL_HASH: &str =
    "$2b$12$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewKyNiLDiXsE1tna";

/// Service owning account state transitions and credential values
///
/// No other component mutates `Account` records; token validation results
/// come in from the token service, state changes go out through here.
pub struct AccountService<A: AccountRepository> {
    /// Account repository for persistence
    repository: Arc<A>,
    /// Service configuration
    config: AccountServiceConfig,
}

impl<A: AccountRepository> AccountService<A> {
    /// Create a new account service
    ///
    /// # Arguments
    ///
    /// * `repository` - Repository for account persistence
    /// * `config` - Credential policy and activation settings
    pub fn new(repository: Arc<A>, config: AccountServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Validate a raw credential against the configured policy
    pub fn validate_credential(&self, credential: &str) -> DomainResult<()> {
        let policy = &self.config.credentials;
        if credential.len() < policy.min_length || credential.len() > policy.max_length {
            return Err(DomainError::ValidationErr(
                ValidationError::InvalidCredentialLength {
                    min: policy.min_length,
                    max: policy.max_length,
                },
            ));
        }
        Ok(())
    }

    /// Register a new account
    ///
    /// The email is validated, normalized to lowercase, and stored with the
    /// bcrypt hash of the credential. The account starts unverified; whether
    /// it starts active is a policy setting.
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` - The created account
    /// * `Err(DomainError::ValidationErr(..))` - Malformed email or credential
    /// * `Err(DomainError::Auth(AuthError::DuplicateEmail))` - Email in use
    pub async fn register(&self, email: &str, credential: &str) -> DomainResult<Account> {
        if !is_valid_email(email) {
            return Err(DomainError::ValidationErr(ValidationError::InvalidEmail));
        }
        self.validate_credential(credential)?;

        let normalized = normalize_email(email);
        let credential_hash = self.hash_credential(credential)?;

        let mut account = Account::new(normalized, credential_hash);
        if !self.config.activate_on_register {
            account.is_active = false;
        }

        let account = self.repository.create(account).await?;

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&account.email),
            event = "account_registered",
            "Registered new account"
        );

        Ok(account)
    }

    /// Look up an account by email, normalized
    pub async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        self.repository.find_by_email(&normalize_email(email)).await
    }

    /// Authenticate an account by email and credential
    ///
    /// Unknown email and wrong password produce the same
    /// `InvalidCredentials`, and the unknown-email path performs a bcrypt
    /// comparison against a fixed hash so the two cannot be told apart by
    /// response time either.
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` - Credentials valid, login recorded
    /// * `Err(DomainError::Auth(AuthError::InvalidCredentials))` - Unknown
    ///   email or wrong credential
    /// * `Err(DomainError::Auth(AuthError::AccountDisabled))` - Deactivated
    /// * `Err(DomainError::Auth(AuthError::VerificationRequired))` - Policy
    ///   gate, only when `require_verified_login` is set
    pub async fn authenticate(&self, email: &str, credential: &str) -> DomainResult<Account> {
        let normalized = normalize_email(email);

        let account = match self.repository.find_by_email(&normalized).await? {
            Some(account) => account,
            None => {
                // Unknown email still pays the bcrypt cost
                let _ = bcrypt::verify(credential, PHANTOM_CREDENTIAL_HASH);
                tracing::info!(
                    email = %mask_email(&normalized),
                    event = "login_unknown_email",
                    "Login attempt for unknown email"
                );
                return Err(DomainError::Auth(AuthError::InvalidCredentials));
            }
        };

        let matches = bcrypt::verify(credential, &account.credential_hash).map_err(|e| {
            DomainError::Internal {
                message: format!("Credential verification failed: {}", e),
            }
        })?;

        if !matches {
            tracing::info!(
                account_id = %account.id,
                event = "login_bad_credential",
                "Login attempt with wrong credential"
            );
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        if account.is_disabled() {
            return Err(DomainError::Auth(AuthError::AccountDisabled));
        }

        if self.config.require_verified_login && !account.is_verified {
            return Err(DomainError::Auth(AuthError::VerificationRequired));
        }

        let mut account = account;
        account.record_login();
        let account = self.repository.update(account).await?;

        tracing::info!(
            account_id = %account.id,
            event = "login_success",
            "Account authenticated"
        );

        Ok(account)
    }

    /// Mark an account's email address as verified
    ///
    /// Idempotent: a second call for an already-verified account is a no-op
    /// success, so retried requests and double-clicked links do not error.
    pub async fn mark_verified(&self, account_id: Uuid) -> DomainResult<Account> {
        let account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("account {}", account_id),
            })?;

        if account.is_verified {
            tracing::debug!(
                account_id = %account.id,
                event = "verify_noop",
                "Account already verified"
            );
            return Ok(account);
        }

        let mut account = account;
        account.verify();
        let account = self.repository.update(account).await?;

        tracing::info!(
            account_id = %account.id,
            event = "account_verified",
            "Account email verified"
        );

        Ok(account)
    }

    /// Replace an account's credential hash after a password reset
    ///
    /// Verification status is untouched: resetting a password proves nothing
    /// about email ownership beyond what the reset token already proved.
    pub async fn apply_reset(&self, account_id: Uuid, new_credential: &str) -> DomainResult<Account> {
        self.validate_credential(new_credential)?;

        let mut account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("account {}", account_id),
            })?;

        account.set_credential_hash(self.hash_credential(new_credential)?);
        let account = self.repository.update(account).await?;

        tracing::info!(
            account_id = %account.id,
            event = "credential_rotated",
            "Account credential replaced"
        );

        Ok(account)
    }

    /// Deactivate an account (tombstone, never deletion)
    pub async fn deactivate(&self, account_id: Uuid) -> DomainResult<Account> {
        let mut account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("account {}", account_id),
            })?;

        account.deactivate();
        let account = self.repository.update(account).await?;

        tracing::info!(
            account_id = %account.id,
            event = "account_deactivated",
            "Account deactivated"
        );

        Ok(account)
    }

    fn hash_credential(&self, credential: &str) -> DomainResult<String> {
        bcrypt::hash(credential, self.config.credentials.bcrypt_cost).map_err(|e| {
            DomainError::Internal {
                message: format!("Credential hashing failed: {}", e),
            }
        })
    }
}
