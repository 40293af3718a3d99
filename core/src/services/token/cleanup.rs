//! Periodic cleanup of inert token records.
//!
//! Consumed and expired tokens stay on disk for a grace period so security
//! investigations can still see them, then get deleted in batches.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{error, info};

use crate::errors::DomainResult;
use crate::repositories::TokenRepository;

/// Configuration for the token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Grace period after expiry before deletion (in days)
    pub grace_period_days: i64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            grace_period_days: 7,   // Keep expired tokens for 7 days
            enabled: true,
        }
    }
}

/// Service for deleting inert verification token records
pub struct TokenCleanupService<T: TokenRepository + 'static> {
    repository: Arc<T>,
    config: TokenCleanupConfig,
}

impl<T: TokenRepository> TokenCleanupService<T> {
    /// Create a new token cleanup service
    pub fn new(repository: Arc<T>, config: TokenCleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single cleanup cycle
    ///
    /// Deletes token records whose expiry lies further in the past than the
    /// configured grace period.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    pub async fn run_cleanup(&self) -> DomainResult<usize> {
        if !self.config.enabled {
            return Ok(0);
        }

        let cutoff = Utc::now() - Duration::days(self.config.grace_period_days);
        let deleted = self.repository.delete_expired_before(cutoff).await?;

        if deleted > 0 {
            info!(
                deleted = deleted,
                cutoff = %cutoff,
                event = "token_cleanup",
                "Deleted inert verification tokens"
            );
        }

        Ok(deleted)
    }

    /// Spawn the periodic cleanup loop
    ///
    /// Errors are logged and the loop continues; a failed cycle only means
    /// the records wait for the next one.
    pub fn spawn(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(self.config.interval_seconds));
            loop {
                interval.tick().await;
                if let Err(e) = self.run_cleanup().await {
                    error!(error = %e, event = "token_cleanup_failed", "Token cleanup cycle failed");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::verification_token::{TokenPurpose, VerificationToken};
    use crate::repositories::token::mock::MockTokenRepository;
    use crate::repositories::TokenRepository as _;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_cleanup_respects_grace_period() {
        let repo = Arc::new(MockTokenRepository::new());

        // Freshly expired: inside the grace period, must survive
        let recent = VerificationToken::new(
            Uuid::new_v4(),
            TokenPurpose::EmailVerify,
            "aa".repeat(32),
            Duration::seconds(-60),
        );
        // Long expired: outside the grace period, must go
        let stale = VerificationToken::new(
            Uuid::new_v4(),
            TokenPurpose::EmailVerify,
            "bb".repeat(32),
            Duration::days(-30),
        );
        repo.issue(recent.clone()).await.unwrap();
        repo.issue(stale.clone()).await.unwrap();

        let service = TokenCleanupService::new(Arc::clone(&repo), TokenCleanupConfig::default());
        let deleted = service.run_cleanup().await.unwrap();

        assert_eq!(deleted, 1);
        assert!(repo.find_by_id(recent.id).await.unwrap().is_some());
        assert!(repo.find_by_id(stale.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cleanup_disabled() {
        let repo = Arc::new(MockTokenRepository::new());
        let stale = VerificationToken::new(
            Uuid::new_v4(),
            TokenPurpose::EmailVerify,
            "cc".repeat(32),
            Duration::days(-30),
        );
        repo.issue(stale).await.unwrap();

        let config = TokenCleanupConfig {
            enabled: false,
            ..Default::default()
        };
        let service = TokenCleanupService::new(Arc::clone(&repo), config);

        assert_eq!(service.run_cleanup().await.unwrap(), 0);
        assert_eq!(repo.len().await, 1);
    }
}
