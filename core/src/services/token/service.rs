//! Token issuance and redemption service.

use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::verification_token::{TokenPurpose, VerificationToken};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::TokenRepository;

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;

/// A freshly issued token
///
/// `raw` exists only long enough to be handed to the notification gateway;
/// the persisted record holds the hash alone.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Raw token string for the verification link
    pub raw: String,
    /// The persisted token record
    pub token: VerificationToken,
}

/// Service for issuing and redeeming verification tokens
pub struct TokenService<T: TokenRepository> {
    /// Token repository for persistence
    repository: Arc<T>,
    /// Service configuration
    config: TokenServiceConfig,
}

impl<T: TokenRepository> TokenService<T> {
    /// Create a new token service
    ///
    /// # Arguments
    ///
    /// * `repository` - Repository for token persistence
    /// * `config` - Purpose-specific token lifetimes
    pub fn new(repository: Arc<T>, config: TokenServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Issue a new token for an account and purpose
    ///
    /// Any previously active token for the same `(account, purpose)` key is
    /// superseded by the repository as part of the insert, so the new token
    /// is the only redeemable one.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - Raw string plus persisted record
    /// * `Err(DomainError::Token(TokenError::EntropyUnavailable))` - Random
    ///   source failure; fatal, no token was stored
    pub async fn issue(
        &self,
        account_id: Uuid,
        purpose: TokenPurpose,
    ) -> DomainResult<IssuedToken> {
        let generated = TokenCodec::generate()?;

        let ttl = Duration::seconds(self.config.ttl_seconds(purpose));
        let token = VerificationToken::new(account_id, purpose, generated.hash, ttl);
        let token = self.repository.issue(token).await?;

        tracing::info!(
            account_id = %account_id,
            token_id = %token.id,
            purpose = %purpose,
            expires_at = %token.expires_at,
            event = "token_issued",
            "Issued verification token"
        );

        Ok(IssuedToken {
            raw: generated.raw,
            token,
        })
    }

    /// Validate a presented raw token and consume it atomically
    ///
    /// The raw string is hashed, looked up, checked against the expected
    /// purpose, and consumed in one repository step. Failure reasons stay
    /// internal (`NotFound`, `PurposeMismatch`, `Expired`,
    /// `AlreadyConsumed`); the orchestration layer collapses them before
    /// they reach a caller.
    pub async fn validate_and_consume(
        &self,
        raw: &str,
        purpose: TokenPurpose,
    ) -> DomainResult<VerificationToken> {
        let hash = TokenCodec::hash(raw);

        let token = self
            .repository
            .find_by_hash(&hash)
            .await?
            .ok_or(DomainError::Token(TokenError::NotFound))?;

        // The lookup already matched on the hash; this re-check keeps the
        // comparison constant-time and covers non-indexed stores.
        if !TokenCodec::verify(raw, &token.token_hash) {
            return Err(DomainError::Token(TokenError::NotFound));
        }

        if token.purpose != purpose {
            tracing::warn!(
                token_id = %token.id,
                expected = %purpose,
                actual = %token.purpose,
                event = "token_purpose_mismatch",
                "Token presented to the wrong flow"
            );
            return Err(DomainError::Token(TokenError::PurposeMismatch));
        }

        let consumed = self.repository.consume(token.id, Utc::now()).await?;

        tracing::info!(
            account_id = %consumed.account_id,
            token_id = %consumed.id,
            purpose = %purpose,
            event = "token_consumed",
            "Consumed verification token"
        );

        Ok(consumed)
    }

    /// Seconds since the newest token was issued for a key
    ///
    /// Returns `None` when no token was ever issued. The reference token
    /// counts whether or not it has been consumed or superseded: the resend
    /// throttle measures notification pressure, not token validity.
    pub async fn seconds_since_last_issue(
        &self,
        account_id: Uuid,
        purpose: TokenPurpose,
    ) -> DomainResult<Option<i64>> {
        let latest = self.repository.find_latest(account_id, purpose).await?;
        Ok(latest.map(|token| token.age_seconds(Utc::now())))
    }

    /// Revoke every outstanding token for an account, any purpose
    ///
    /// Containment measure after a credential change: no previously mailed
    /// link may remain redeemable.
    pub async fn revoke_all(&self, account_id: Uuid) -> DomainResult<usize> {
        let revoked = self
            .repository
            .revoke_all_for_account(account_id, Utc::now())
            .await?;

        if revoked > 0 {
            tracing::info!(
                account_id = %account_id,
                revoked = revoked,
                event = "tokens_revoked",
                "Revoked outstanding verification tokens"
            );
        }

        Ok(revoked)
    }
}
