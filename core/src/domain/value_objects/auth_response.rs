//! Authentication response value object.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authentication response returned after a successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// Bearer token for API authentication
    pub token: String,

    /// Token type, always "Bearer"
    pub token_type: String,

    /// Token expiration time in seconds
    pub expires_in: i64,

    /// Authenticated account ID
    pub account_id: Uuid,

    /// Whether the account still needs to verify its email address
    pub requires_verification: bool,
}

impl AuthResponse {
    /// Creates a new authentication response
    ///
    /// # Arguments
    ///
    /// * `token` - Session bearer token
    /// * `expires_in` - Token expiration in seconds
    /// * `account_id` - Authenticated account
    /// * `is_verified` - Whether the account's email is verified
    pub fn new(token: String, expires_in: i64, account_id: Uuid, is_verified: bool) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
            account_id,
            requires_verification: !is_verified,
        }
    }
}
