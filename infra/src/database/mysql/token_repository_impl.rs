//! MySQL implementation of the TokenRepository trait.
//!
//! Atomicity is carried by the database: `issue` supersedes and inserts
//! inside one transaction, and `consume` is a single conditional UPDATE
//! whose `rows_affected` decides the winner between concurrent redeemers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use vc_core::domain::entities::verification_token::{TokenPurpose, VerificationToken};
use vc_core::errors::{DomainError, TokenError};
use vc_core::repositories::TokenRepository;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to VerificationToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<VerificationToken, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;
        let account_id: String = row.try_get("account_id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get account_id: {}", e),
        })?;
        let purpose: String = row.try_get("purpose").map_err(|e| DomainError::Internal {
            message: format!("Failed to get purpose: {}", e),
        })?;

        Ok(VerificationToken {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid token UUID: {}", e),
            })?,
            account_id: Uuid::parse_str(&account_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid account UUID: {}", e),
            })?,
            purpose: TokenPurpose::parse(&purpose).ok_or_else(|| DomainError::Internal {
                message: format!("Unknown token purpose: {}", purpose),
            })?,
            token_hash: row.try_get("token_hash").map_err(|e| DomainError::Internal {
                message: format!("Failed to get token_hash: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
            consumed: row.try_get("consumed").map_err(|e| DomainError::Internal {
                message: format!("Failed to get consumed: {}", e),
            })?,
            consumed_at: row
                .try_get::<Option<DateTime<Utc>>, _>("consumed_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get consumed_at: {}", e),
                })?,
        })
    }

    const SELECT_COLUMNS: &'static str =
        "id, account_id, purpose, token_hash, created_at, expires_at, consumed, consumed_at";
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn issue(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to begin transaction: {}", e),
        })?;

        // Supersede the previous active token for this key
        let supersede = r#"
            UPDATE verification_token
            SET consumed = TRUE, consumed_at = ?
            WHERE account_id = ? AND purpose = ? AND consumed = FALSE
        "#;
        sqlx::query(supersede)
            .bind(token.created_at)
            .bind(token.account_id.to_string())
            .bind(token.purpose.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to supersede tokens: {}", e),
            })?;

        let insert = r#"
            INSERT INTO verification_token (
                id, account_id, purpose, token_hash,
                created_at, expires_at, consumed, consumed_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;
        sqlx::query(insert)
            .bind(token.id.to_string())
            .bind(token.account_id.to_string())
            .bind(token.purpose.as_str())
            .bind(&token.token_hash)
            .bind(token.created_at)
            .bind(token.expires_at)
            .bind(token.consumed)
            .bind(token.consumed_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to insert token: {}", e),
            })?;

        tx.commit().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to commit token issue: {}", e),
        })?;

        Ok(token)
    }

    async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<VerificationToken>, DomainError> {
        let query = format!(
            "SELECT {} FROM verification_token WHERE token_hash = ? LIMIT 1",
            Self::SELECT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find token by hash: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationToken>, DomainError> {
        let query = format!(
            "SELECT {} FROM verification_token WHERE id = ? LIMIT 1",
            Self::SELECT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find token by id: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_latest(
        &self,
        account_id: Uuid,
        purpose: TokenPurpose,
    ) -> Result<Option<VerificationToken>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM verification_token
            WHERE account_id = ? AND purpose = ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
            Self::SELECT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(account_id.to_string())
            .bind(purpose.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find latest token: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn consume(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<VerificationToken, DomainError> {
        // Check-and-flip in one statement: of two concurrent callers only
        // one sees rows_affected = 1
        let update = r#"
            UPDATE verification_token
            SET consumed = TRUE, consumed_at = ?
            WHERE id = ? AND consumed = FALSE AND expires_at > ?
        "#;

        let result = sqlx::query(update)
            .bind(now)
            .bind(id.to_string())
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to consume token: {}", e),
            })?;

        if result.rows_affected() == 1 {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| DomainError::Internal {
                    message: format!("Consumed token {} disappeared", id),
                });
        }

        // The update lost; classify why from the current row state
        match self.find_by_id(id).await? {
            None => Err(DomainError::Token(TokenError::NotFound)),
            Some(token) if token.consumed => Err(DomainError::Token(TokenError::AlreadyConsumed)),
            Some(_) => Err(DomainError::Token(TokenError::Expired)),
        }
    }

    async fn revoke_all_for_account(
        &self,
        account_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let query = r#"
            UPDATE verification_token
            SET consumed = TRUE, consumed_at = ?
            WHERE account_id = ? AND consumed = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(now)
            .bind(account_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to revoke account tokens: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let query = "DELETE FROM verification_token WHERE expires_at < ?";

        let result = sqlx::query(query)
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete expired tokens: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }
}
