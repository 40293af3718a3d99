//! Configuration for the authentication flow orchestration

use vc_shared::config::RateLimitConfig;

/// Configuration for the authentication flows
#[derive(Debug, Clone)]
pub struct AuthFlowConfig {
    /// Minimum seconds between verification resends per account
    pub min_resend_interval_seconds: i64,
    /// Whether the resend throttle is enforced
    pub resend_throttle_enabled: bool,
}

impl Default for AuthFlowConfig {
    fn default() -> Self {
        Self {
            min_resend_interval_seconds: 60,
            resend_throttle_enabled: true,
        }
    }
}

impl AuthFlowConfig {
    /// Build flow configuration from the shared rate limit settings
    pub fn from_rate_limit(config: &RateLimitConfig) -> Self {
        Self {
            min_resend_interval_seconds: config.min_resend_interval,
            resend_throttle_enabled: config.enabled,
        }
    }
}
