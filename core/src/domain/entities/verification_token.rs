//! Verification token entity for email verification and password reset.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The purpose a verification token was issued for
///
/// Tokens are never valid across purposes: an email verification token
/// cannot be redeemed in the password reset flow, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Proves control of the registered email address
    EmailVerify,
    /// Authorizes a credential replacement
    PasswordReset,
}

impl TokenPurpose {
    /// Stable string form used for persistence and logging
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::EmailVerify => "email_verify",
            TokenPurpose::PasswordReset => "password_reset",
        }
    }

    /// Parse the persisted string form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "email_verify" => Some(TokenPurpose::EmailVerify),
            "password_reset" => Some(TokenPurpose::PasswordReset),
            _ => None,
        }
    }
}

impl fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verification token record
///
/// Only the SHA-256 hash of the token string is stored; the raw string is
/// handed to the notification gateway once and then dropped. A consumed
/// token is terminal: the flag is never cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationToken {
    /// Unique identifier for the token record
    pub id: Uuid,

    /// Account this token belongs to
    pub account_id: Uuid,

    /// What the token may be redeemed for
    pub purpose: TokenPurpose,

    /// Hex-encoded SHA-256 hash of the raw token string
    pub token_hash: String,

    /// Timestamp when the token was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been consumed or superseded
    pub consumed: bool,

    /// Timestamp of consumption, if consumed
    pub consumed_at: Option<DateTime<Utc>>,
}

impl VerificationToken {
    /// Creates a new unconsumed token
    ///
    /// # Arguments
    ///
    /// * `account_id` - The owning account
    /// * `purpose` - What the token may be redeemed for
    /// * `token_hash` - Hash of the raw token string
    /// * `ttl` - Time until the token expires
    pub fn new(account_id: Uuid, purpose: TokenPurpose, token_hash: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_id,
            purpose,
            token_hash,
            created_at: now,
            expires_at: now + ttl,
            consumed: false,
            consumed_at: None,
        }
    }

    /// Checks if the token is expired at the given instant
    ///
    /// The boundary is exclusive: a token whose expiry equals `now` is
    /// already expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks if the token is expired now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks if the token can still be redeemed at the given instant
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        !self.consumed && !self.is_expired_at(now)
    }

    /// Checks if the token can still be redeemed now
    pub fn is_usable(&self) -> bool {
        self.is_usable_at(Utc::now())
    }

    /// Marks the token as consumed at the given instant
    pub fn mark_consumed(&mut self, now: DateTime<Utc>) {
        self.consumed = true;
        self.consumed_at = Some(now);
    }

    /// Seconds elapsed since issuance at the given instant
    pub fn age_seconds(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_seconds()
    }
}
