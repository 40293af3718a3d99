//! MySQL implementation of the AccountRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use vc_core::domain::entities::account::Account;
use vc_core::errors::{AuthError, DomainError};
use vc_core::repositories::AccountRepository;

/// MySQL implementation of AccountRepository
///
/// The `account` table carries a unique index over the email column; emails
/// arrive here already normalized to lowercase, so the index enforces
/// case-insensitive uniqueness.
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid account UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            credential_hash: row
                .try_get("credential_hash")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get credential_hash: {}", e),
                })?,
            is_active: row.try_get("is_active").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_active: {}", e),
            })?,
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get is_verified: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
            last_login_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get last_login_at: {}", e),
                })?,
            deactivated_at: row
                .try_get::<Option<DateTime<Utc>>, _>("deactivated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get deactivated_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO account (
                id, email, credential_hash, is_active, is_verified,
                created_at, updated_at, last_login_at, deactivated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.email)
            .bind(&account.credential_hash)
            .bind(account.is_active)
            .bind(account.is_verified)
            .bind(account.created_at)
            .bind(account.updated_at)
            .bind(account.last_login_at)
            .bind(account.deactivated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(account),
            // The unique email index is the authoritative duplicate check
            Err(e)
                if e.as_database_error()
                    .map(|d| d.is_unique_violation())
                    .unwrap_or(false) =>
            {
                Err(DomainError::Auth(AuthError::DuplicateEmail))
            }
            Err(e) => Err(DomainError::Internal {
                message: format!("Failed to create account: {}", e),
            }),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = r#"
            SELECT id, email, credential_hash, is_active, is_verified,
                   created_at, updated_at, last_login_at, deactivated_at
            FROM account
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find account by email: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = r#"
            SELECT id, email, credential_hash, is_active, is_verified,
                   created_at, updated_at, last_login_at, deactivated_at
            FROM account
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find account by id: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE account
            SET email = ?, credential_hash = ?, is_active = ?, is_verified = ?,
                updated_at = ?, last_login_at = ?, deactivated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&account.email)
            .bind(&account.credential_hash)
            .bind(account.is_active)
            .bind(account.is_verified)
            .bind(account.updated_at)
            .bind(account.last_login_at)
            .bind(account.deactivated_at)
            .bind(account.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update account: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("account {}", account.id),
            });
        }

        Ok(account)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let query = "SELECT EXISTS(SELECT 1 FROM account WHERE email = ?) AS present";

        let row = sqlx::query(query)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check account existence: {}", e),
            })?;

        let present: i8 = row.try_get("present").map_err(|e| DomainError::Internal {
            message: format!("Failed to get existence result: {}", e),
        })?;

        Ok(present == 1)
    }
}
