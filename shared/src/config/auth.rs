//! Authentication and credential configuration

use serde::{Deserialize, Serialize};

/// Session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Secret key for signing session tokens
    pub secret: String,

    /// Session token expiry time in seconds
    pub token_expiry: i64,

    /// Issuer claim embedded in session tokens
    pub issuer: String,

    /// Audience claim embedded in session tokens
    #[serde(default)]
    pub audience: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: String::from("your-secret-key-change-in-production"),
            token_expiry: 86400, // 24 hours
            issuer: String::from("virtcloud"),
            audience: Some(String::from("virtcloud-api")),
        }
    }
}

impl SessionConfig {
    /// Create a new session configuration with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set session token expiry in hours
    pub fn with_expiry_hours(mut self, hours: i64) -> Self {
        self.token_expiry = hours * 3600;
        self
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "your-secret-key-change-in-production"
    }
}

/// Verification token lifetime configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenPolicyConfig {
    /// Email verification token time-to-live in seconds
    pub email_verify_ttl: i64,

    /// Password reset token time-to-live in seconds
    pub password_reset_ttl: i64,
}

impl Default for TokenPolicyConfig {
    fn default() -> Self {
        Self {
            email_verify_ttl: 86400, // 24 hours
            password_reset_ttl: 3600, // 1 hour
        }
    }
}

/// Credential hashing and strength configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialConfig {
    /// bcrypt cost factor for credential hashing
    pub bcrypt_cost: u32,

    /// Minimum accepted credential length
    pub min_length: usize,

    /// Maximum accepted credential length (bcrypt truncates past 72 bytes)
    pub max_length: usize,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 12,
            min_length: 8,
            max_length: 72,
        }
    }
}

/// Combined authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Session token configuration
    pub session: SessionConfig,

    /// Verification token lifetimes
    #[serde(default)]
    pub tokens: TokenPolicyConfig,

    /// Credential hashing configuration
    #[serde(default)]
    pub credentials: CredentialConfig,
}
