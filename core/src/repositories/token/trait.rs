//! Token repository trait defining the interface for verification token
//! persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::verification_token::{TokenPurpose, VerificationToken};
use crate::errors::DomainError;

/// Repository trait for VerificationToken persistence operations
///
/// # Concurrency Contract
/// `issue` and `consume` are the two operations that require true mutual
/// exclusion. `issue` must supersede and insert as one indivisible step per
/// `(account_id, purpose)` key; `consume` must check expiry and flip the
/// consumed flag as one indivisible step per token id, so that of two
/// concurrent consumers exactly one succeeds. Implementations use a
/// transaction or conditional update, never a coarse global lock.
///
/// # Security Considerations
/// - Only token hashes are stored; raw token strings never reach this layer
/// - Consumed is terminal: no operation ever clears the flag
/// - Inert records are removed by `delete_expired_before`, not overwritten
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a new token, superseding any active token for the same key
    ///
    /// Any unconsumed token with the same `(account_id, purpose)` is marked
    /// consumed before the insert, so at most one active token exists per
    /// key at any time.
    ///
    /// # Arguments
    /// * `token` - The VerificationToken entity to persist
    ///
    /// # Returns
    /// * `Ok(VerificationToken)` - The stored token
    /// * `Err(DomainError)` - Storage error occurred
    async fn issue(&self, token: VerificationToken) -> Result<VerificationToken, DomainError>;

    /// Find a token by its stored hash
    ///
    /// # Arguments
    /// * `token_hash` - Hex-encoded SHA-256 hash of the presented token
    ///
    /// # Returns
    /// * `Ok(Some(VerificationToken))` - Token found (any state)
    /// * `Ok(None)` - No token with the given hash
    async fn find_by_hash(&self, token_hash: &str)
        -> Result<Option<VerificationToken>, DomainError>;

    /// Find a token by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationToken>, DomainError>;

    /// Find the most recently issued token for a key, consumed or not
    ///
    /// Used by the resend throttle: the newest token's `created_at` is the
    /// reference point for the minimum resend interval.
    async fn find_latest(
        &self,
        account_id: Uuid,
        purpose: TokenPurpose,
    ) -> Result<Option<VerificationToken>, DomainError>;

    /// Atomically consume a token
    ///
    /// Checks expiry and flips the consumed flag in one indivisible step.
    /// Under concurrent duplicate attempts exactly one caller receives
    /// `Ok`; every other caller receives `AlreadyConsumed`.
    ///
    /// # Arguments
    /// * `id` - The token to consume
    /// * `now` - The instant to evaluate expiry against and record as the
    ///   consumption timestamp
    ///
    /// # Returns
    /// * `Ok(VerificationToken)` - The consumed token
    /// * `Err(DomainError::Token(TokenError::NotFound))` - Unknown id
    /// * `Err(DomainError::Token(TokenError::Expired))` - Past expiry, not consumed
    /// * `Err(DomainError::Token(TokenError::AlreadyConsumed))` - Consumed before
    async fn consume(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<VerificationToken, DomainError>;

    /// Mark every outstanding token for an account as consumed
    ///
    /// Applied after a successful credential reset so no previously issued
    /// link of any purpose remains usable.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens revoked
    async fn revoke_all_for_account(
        &self,
        account_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError>;

    /// Delete inert token records that expired before the cutoff
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError>;
}
