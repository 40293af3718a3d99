//! Notification gateway interface.
//!
//! Delivery itself is an external collaborator (SMTP relay, provider API);
//! the core only hands over a structured message and records the outcome.
//! Delivery failure never rolls back the state transition that triggered
//! the message.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

use crate::domain::entities::verification_token::TokenPurpose;
use crate::errors::NotificationError;

/// A verification or reset message to be delivered to an account holder
///
/// This is the only place a raw token string travels after issuance. The
/// `Debug` impl redacts it so the message can be logged safely.
#[derive(Clone)]
pub struct VerificationMessage {
    /// Recipient email address
    pub recipient: String,
    /// Which flow the embedded token belongs to
    pub purpose: TokenPurpose,
    /// Raw token string to embed in the link
    pub raw_token: String,
    /// Account the message concerns
    pub account_id: Uuid,
}

impl fmt::Debug for VerificationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationMessage")
            .field("recipient", &self.recipient)
            .field("purpose", &self.purpose)
            .field("raw_token", &"<redacted>")
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Receipt returned by a gateway that accepted a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Gateway-assigned message identifier
    pub message_id: String,
    /// When the gateway accepted the message
    pub accepted_at: DateTime<Utc>,
}

/// Trait for notification delivery integration
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Hand a message to the delivery collaborator
    ///
    /// # Returns
    /// * `Ok(DeliveryReceipt)` - Message accepted for delivery
    /// * `Err(NotificationError::DeliveryFailed)` - Gateway rejected the message
    async fn send(&self, message: VerificationMessage)
        -> Result<DeliveryReceipt, NotificationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_raw_token() {
        let message = VerificationMessage {
            recipient: "alice@example.com".to_string(),
            purpose: TokenPurpose::EmailVerify,
            raw_token: "super-secret-token".to_string(),
            account_id: Uuid::new_v4(),
        };

        let debug = format!("{:?}", message);
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("alice@example.com"));
    }
}
