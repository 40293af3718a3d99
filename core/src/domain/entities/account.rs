//! Account entity representing a registered control panel user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account entity for the control panel
///
/// The email address is stored in normalized (lowercase) form and is unique
/// case-insensitively. Only the bcrypt hash of the credential is ever held;
/// the raw credential never reaches this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Normalized (lowercase) email address
    pub email: String,

    /// bcrypt hash of the account credential
    #[serde(skip_serializing)]
    pub credential_hash: String,

    /// Whether the account may authenticate
    pub is_active: bool,

    /// Whether the email address has been verified
    pub is_verified: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the account's last login
    pub last_login_at: Option<DateTime<Utc>>,

    /// Timestamp when the account was deactivated, if ever
    pub deactivated_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Creates a new active, unverified account
    ///
    /// # Arguments
    ///
    /// * `email` - Normalized email address
    /// * `credential_hash` - bcrypt hash of the credential
    pub fn new(email: String, credential_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            credential_hash,
            is_active: true,
            is_verified: false,
            created_at: now,
            updated_at: now,
            last_login_at: None,
            deactivated_at: None,
        }
    }

    /// Marks the account's email address as verified
    ///
    /// Idempotent: verifying an already-verified account changes nothing.
    pub fn verify(&mut self) {
        if !self.is_verified {
            self.is_verified = true;
            self.updated_at = Utc::now();
        }
    }

    /// Replaces the credential hash after a password reset
    pub fn set_credential_hash(&mut self, credential_hash: String) {
        self.credential_hash = credential_hash;
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Deactivates the account
    ///
    /// Tombstone semantics: the record is flagged and timestamped, never
    /// removed.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.deactivated_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Reactivates a previously deactivated account
    pub fn reactivate(&mut self) {
        self.is_active = true;
        self.deactivated_at = None;
        self.updated_at = Utc::now();
    }

    /// Checks if the account is allowed to authenticate
    pub fn is_disabled(&self) -> bool {
        !self.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new("alice@example.com".to_string(), "hash".to_string())
    }

    #[test]
    fn test_new_account() {
        let account = account();

        assert_eq!(account.email, "alice@example.com");
        assert!(account.is_active);
        assert!(!account.is_verified);
        assert!(account.last_login_at.is_none());
        assert!(account.deactivated_at.is_none());
    }

    #[test]
    fn test_verify_is_idempotent() {
        let mut account = account();

        account.verify();
        assert!(account.is_verified);
        let first_update = account.updated_at;

        account.verify();
        assert!(account.is_verified);
        assert_eq!(account.updated_at, first_update);
    }

    #[test]
    fn test_set_credential_hash() {
        let mut account = account();
        account.set_credential_hash("new-hash".to_string());
        assert_eq!(account.credential_hash, "new-hash");
    }

    #[test]
    fn test_deactivate_sets_tombstone() {
        let mut account = account();

        account.deactivate();
        assert!(account.is_disabled());
        assert!(account.deactivated_at.is_some());

        account.reactivate();
        assert!(!account.is_disabled());
        assert!(account.deactivated_at.is_none());
    }

    #[test]
    fn test_record_login() {
        let mut account = account();
        assert!(account.last_login_at.is_none());
        account.record_login();
        assert!(account.last_login_at.is_some());
    }
}
