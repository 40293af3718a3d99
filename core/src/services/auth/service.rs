//! Main authentication flow orchestration.

use std::sync::Arc;
use uuid::Uuid;

use vc_shared::utils::validation::mask_email;

use crate::domain::entities::account::Account;
use crate::domain::entities::session::Claims;
use crate::domain::entities::verification_token::TokenPurpose;
use crate::domain::value_objects::auth_response::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{AccountRepository, TokenRepository};
use crate::services::account::AccountService;
use crate::services::notification::{NotificationGateway, VerificationMessage};
use crate::services::session::SessionService;
use crate::services::token::TokenService;

use super::config::AuthFlowConfig;
use super::types::RegisterResult;

/// Orchestrates the account verification and credential flows
///
/// Composes the account service, token service, session service, and the
/// external notification gateway. Every inbound operation of the subsystem
/// enters through here.
pub struct AuthService<A, T, N>
where
    A: AccountRepository,
    T: TokenRepository,
    N: NotificationGateway,
{
    /// Account state transitions and credential checks
    accounts: AccountService<A>,
    /// Verification token issuance and redemption
    tokens: TokenService<T>,
    /// External delivery collaborator
    gateway: Arc<N>,
    /// Session token issuance
    sessions: SessionService,
    /// Flow configuration
    config: AuthFlowConfig,
}

impl<A, T, N> AuthService<A, T, N>
where
    A: AccountRepository,
    T: TokenRepository,
    N: NotificationGateway,
{
    /// Create a new authentication flow service
    ///
    /// # Arguments
    ///
    /// * `accounts` - Account service for state transitions
    /// * `tokens` - Token service for issuance and redemption
    /// * `gateway` - Notification delivery collaborator
    /// * `sessions` - Session token issuer
    /// * `config` - Flow configuration
    pub fn new(
        accounts: AccountService<A>,
        tokens: TokenService<T>,
        gateway: Arc<N>,
        sessions: SessionService,
        config: AuthFlowConfig,
    ) -> Self {
        Self {
            accounts,
            tokens,
            gateway,
            sessions,
            config,
        }
    }

    /// Register a new account and send the verification message
    ///
    /// The account and its email verification token are committed before the
    /// notification is attempted; a delivery failure is reported in the
    /// result, never rolled back.
    ///
    /// # Returns
    ///
    /// * `Ok(RegisterResult)` - Account created
    /// * `Err(DomainError::Auth(AuthError::DuplicateEmail))` - Email in use
    /// * `Err(DomainError::ValidationErr(..))` - Malformed input
    /// * `Err(DomainError::Token(TokenError::EntropyUnavailable))` - Fatal
    pub async fn register(&self, email: &str, credential: &str) -> DomainResult<RegisterResult> {
        let account = self.accounts.register(email, credential).await?;
        let issued = self.tokens.issue(account.id, TokenPurpose::EmailVerify).await?;

        let verification_sent = self
            .dispatch(&account, TokenPurpose::EmailVerify, issued.raw)
            .await;

        Ok(RegisterResult {
            account_id: account.id,
            email: account.email,
            verification_sent,
        })
    }

    /// Authenticate and open a session
    pub async fn login(&self, email: &str, credential: &str) -> DomainResult<AuthResponse> {
        let account = self.accounts.authenticate(email, credential).await?;
        self.sessions.issue(&account)
    }

    /// Verify a presented session token
    pub fn verify_session(&self, token: &str) -> DomainResult<Claims> {
        self.sessions.verify(token)
    }

    /// Resend the email verification message
    ///
    /// Uniform success for unknown emails and for accounts that are already
    /// verified: the response never discloses whether an address is
    /// registered, and a duplicate click is not an error. A fresh token
    /// supersedes the previous one, subject to the minimum resend interval.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Resent, or nothing to do
    /// * `Err(DomainError::Auth(AuthError::RateLimitExceeded))` - Throttled
    pub async fn resend_verification(&self, email: &str) -> DomainResult<()> {
        let account = match self.accounts.find_by_email(email).await? {
            Some(account) => account,
            None => {
                tracing::debug!(
                    email = %mask_email(email),
                    event = "resend_unknown_email",
                    "Verification resend for unknown email"
                );
                return Ok(());
            }
        };

        if account.is_verified {
            tracing::debug!(
                account_id = %account.id,
                event = "resend_already_verified",
                "Verification resend for verified account"
            );
            return Ok(());
        }

        self.check_resend_interval(account.id).await?;

        let issued = self.tokens.issue(account.id, TokenPurpose::EmailVerify).await?;
        self.dispatch(&account, TokenPurpose::EmailVerify, issued.raw)
            .await;

        Ok(())
    }

    /// Redeem an email verification token
    ///
    /// Consumes the token atomically and marks the account verified. Every
    /// failure shape collapses to `InvalidOrExpired` so the endpoint cannot
    /// be used to probe which tokens exist; the internal reason is logged.
    ///
    /// # Returns
    ///
    /// * `Ok(Uuid)` - The verified account's id
    /// * `Err(DomainError::Token(TokenError::InvalidOrExpired))` - Rejected
    pub async fn verify_email(&self, raw_token: &str) -> DomainResult<Uuid> {
        let token = self
            .tokens
            .validate_and_consume(raw_token, TokenPurpose::EmailVerify)
            .await
            .map_err(Self::collapse_token_failure)?;

        let account = self
            .accounts
            .mark_verified(token.account_id)
            .await
            .map_err(|e| match e {
                // Account vanished between issuance and redemption; to the
                // caller that link is simply dead
                DomainError::NotFound { .. } => DomainError::Token(TokenError::InvalidOrExpired),
                other => other,
            })?;

        Ok(account.id)
    }

    /// Request a password reset message
    ///
    /// Always returns success: whether or not the email is registered, the
    /// caller sees the same outcome. When the account exists, a reset token
    /// is issued (superseding any earlier one) and dispatched. Two quick
    /// successive requests both succeed; only the newest link works.
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<()> {
        let account = match self.accounts.find_by_email(email).await? {
            Some(account) => account,
            None => {
                tracing::debug!(
                    email = %mask_email(email),
                    event = "reset_unknown_email",
                    "Password reset requested for unknown email"
                );
                return Ok(());
            }
        };

        let issued = self
            .tokens
            .issue(account.id, TokenPurpose::PasswordReset)
            .await?;
        self.dispatch(&account, TokenPurpose::PasswordReset, issued.raw)
            .await;

        Ok(())
    }

    /// Redeem a password reset token and apply the new credential
    ///
    /// The new credential is validated before the token is consumed, so a
    /// rejected credential leaves the single-use link intact for a retry.
    /// After a successful reset every other outstanding token for the
    /// account is revoked: a credential change invalidates anything mailed
    /// out before it.
    ///
    /// # Returns
    ///
    /// * `Ok(Uuid)` - The account whose credential was replaced
    /// * `Err(DomainError::Token(TokenError::InvalidOrExpired))` - Rejected
    /// * `Err(DomainError::ValidationErr(..))` - Credential policy failure
    pub async fn apply_password_reset(
        &self,
        raw_token: &str,
        new_credential: &str,
    ) -> DomainResult<Uuid> {
        self.accounts.validate_credential(new_credential)?;

        let token = self
            .tokens
            .validate_and_consume(raw_token, TokenPurpose::PasswordReset)
            .await
            .map_err(Self::collapse_token_failure)?;

        let account = self
            .accounts
            .apply_reset(token.account_id, new_credential)
            .await
            .map_err(|e| match e {
                DomainError::NotFound { .. } => DomainError::Token(TokenError::InvalidOrExpired),
                other => other,
            })?;

        self.tokens.revoke_all(account.id).await?;

        Ok(account.id)
    }

    /// Enforce the minimum interval between verification resends
    async fn check_resend_interval(&self, account_id: Uuid) -> DomainResult<()> {
        if !self.config.resend_throttle_enabled {
            return Ok(());
        }

        if let Some(age) = self
            .tokens
            .seconds_since_last_issue(account_id, TokenPurpose::EmailVerify)
            .await?
        {
            let min = self.config.min_resend_interval_seconds;
            if age < min {
                tracing::warn!(
                    account_id = %account_id,
                    age_seconds = age,
                    event = "resend_throttled",
                    "Verification resend within minimum interval"
                );
                return Err(DomainError::Auth(AuthError::RateLimitExceeded {
                    seconds: min - age,
                }));
            }
        }

        Ok(())
    }

    /// Hand a token to the notification gateway
    ///
    /// Returns whether the gateway accepted the message. The token is
    /// already committed by this point; a failure here is logged and left
    /// for the user to retry via resend.
    async fn dispatch(&self, account: &Account, purpose: TokenPurpose, raw_token: String) -> bool {
        let message = VerificationMessage {
            recipient: account.email.clone(),
            purpose,
            raw_token,
            account_id: account.id,
        };

        match self.gateway.send(message).await {
            Ok(receipt) => {
                tracing::info!(
                    account_id = %account.id,
                    purpose = %purpose,
                    message_id = %receipt.message_id,
                    event = "notification_dispatched",
                    "Notification accepted by gateway"
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    account_id = %account.id,
                    purpose = %purpose,
                    error = %e,
                    event = "notification_delivery_failed",
                    "Notification delivery failed; state transition stands"
                );
                false
            }
        }
    }

    /// Collapse internal token-rejection reasons into the uniform boundary
    /// error, logging the distinction for metrics
    fn collapse_token_failure(err: DomainError) -> DomainError {
        match err {
            DomainError::Token(e) => match e {
                TokenError::NotFound
                | TokenError::Expired
                | TokenError::AlreadyConsumed
                | TokenError::PurposeMismatch => {
                    tracing::info!(
                        reason = %e,
                        event = "token_rejected",
                        "Verification token rejected"
                    );
                    DomainError::Token(TokenError::InvalidOrExpired)
                }
                other => DomainError::Token(other),
            },
            other => other,
        }
    }
}
