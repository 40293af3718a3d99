//! Session token claims for authenticated API access.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default session token lifetime (24 hours)
pub const DEFAULT_SESSION_EXPIRY_SECONDS: i64 = 86400;

/// Claims structure for the session token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Token ID (unique identifier for the session)
    pub jti: String,

    /// Whether the account's email address is verified
    pub verified: bool,
}

impl Claims {
    /// Creates new claims for a session token
    ///
    /// # Arguments
    ///
    /// * `account_id` - The account's UUID
    /// * `verified` - Whether the account's email is verified
    /// * `expiry_seconds` - Session lifetime in seconds
    /// * `issuer` - Issuer claim value
    /// * `audience` - Audience claim value
    pub fn new_session(
        account_id: Uuid,
        verified: bool,
        expiry_seconds: i64,
        issuer: String,
        audience: String,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(expiry_seconds);

        Self {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer,
            aud: audience,
            jti: Uuid::new_v4().to_string(),
            verified,
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the account ID from the claims
    pub fn account_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}
