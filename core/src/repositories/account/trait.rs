//! Account repository trait defining the interface for account persistence.
//!
//! The trait is async-first and uses Result types for proper error handling.
//! Implementations handle the actual storage while the domain layer stays
//! storage-agnostic.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
///
/// Email lookups take the normalized (lowercase) form produced by
/// `vc_shared::utils::validation::normalize_email`; uniqueness is therefore
/// case-insensitive by construction. Implementations must enforce the unique
/// email constraint on `create` and report violations as
/// `AuthError::DuplicateEmail`.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Create a new account
    ///
    /// # Arguments
    /// * `account` - The Account entity to persist
    ///
    /// # Returns
    /// * `Ok(Account)` - The created account
    /// * `Err(DomainError::Auth(AuthError::DuplicateEmail))` - Email already registered
    /// * `Err(DomainError)` - Storage error occurred
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Find an account by its normalized email address
    ///
    /// # Arguments
    /// * `email` - Normalized (lowercase) email address
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with the given email
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Update an existing account
    ///
    /// # Returns
    /// * `Ok(Account)` - The updated account
    /// * `Err(DomainError::NotFound)` - No account with the given id
    async fn update(&self, account: Account) -> Result<Account, DomainError>;

    /// Check if an account exists with the given normalized email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
