//! Result types for the authentication flows

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of a successful registration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResult {
    /// The new account's identifier
    pub account_id: Uuid,

    /// Normalized email the account was created with
    pub email: String,

    /// Whether the verification message was accepted by the gateway
    ///
    /// `false` means delivery failed; the account and its token exist
    /// regardless, and the user can request a resend.
    pub verification_sent: bool,
}
