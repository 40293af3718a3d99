//! Configuration for the token service

use vc_shared::config::TokenPolicyConfig;

use crate::domain::entities::verification_token::TokenPurpose;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Email verification token time-to-live in seconds
    pub email_verify_ttl_seconds: i64,
    /// Password reset token time-to-live in seconds
    pub password_reset_ttl_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from_policy(&TokenPolicyConfig::default())
    }
}

impl TokenServiceConfig {
    /// Build service configuration from the shared token policy
    pub fn from_policy(policy: &TokenPolicyConfig) -> Self {
        Self {
            email_verify_ttl_seconds: policy.email_verify_ttl,
            password_reset_ttl_seconds: policy.password_reset_ttl,
        }
    }

    /// Time-to-live for tokens of the given purpose
    pub fn ttl_seconds(&self, purpose: TokenPurpose) -> i64 {
        match purpose {
            TokenPurpose::EmailVerify => self.email_verify_ttl_seconds,
            TokenPurpose::PasswordReset => self.password_reset_ttl_seconds,
        }
    }
}
