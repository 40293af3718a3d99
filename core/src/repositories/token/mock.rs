//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_token::{TokenPurpose, VerificationToken};
use crate::errors::{DomainError, TokenError};

use super::r#trait::TokenRepository;

/// Mock token repository for testing
///
/// A single write lock around the map gives `issue` and `consume` the same
/// indivisibility the MySQL implementation gets from transactions and
/// conditional updates.
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, VerificationToken>>>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored token records, any state
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn issue(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        // Supersede: the previous active token for this key dies with the
        // insert, inside the same critical section.
        for existing in tokens.values_mut() {
            if existing.account_id == token.account_id
                && existing.purpose == token.purpose
                && !existing.consumed
            {
                existing.mark_consumed(token.created_at);
            }
        }

        tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<VerificationToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.token_hash == token_hash).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(&id).cloned())
    }

    async fn find_latest(
        &self,
        account_id: Uuid,
        purpose: TokenPurpose,
    ) -> Result<Option<VerificationToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .filter(|t| t.account_id == account_id && t.purpose == purpose)
            .max_by_key(|t| t.created_at)
            .cloned())
    }

    async fn consume(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<VerificationToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        let token = tokens
            .get_mut(&id)
            .ok_or(DomainError::Token(TokenError::NotFound))?;

        if token.consumed {
            return Err(DomainError::Token(TokenError::AlreadyConsumed));
        }
        if token.is_expired_at(now) {
            return Err(DomainError::Token(TokenError::Expired));
        }

        token.mark_consumed(now);
        Ok(token.clone())
    }

    async fn revoke_all_for_account(
        &self,
        account_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let mut count = 0;

        for token in tokens.values_mut() {
            if token.account_id == account_id && !token.consumed {
                token.mark_consumed(now);
                count += 1;
            }
        }

        Ok(count)
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, token| token.expires_at >= cutoff);

        Ok(initial_count - tokens.len())
    }
}
