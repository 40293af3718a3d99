//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Rate limiting configuration for notification-sending flows
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Minimum interval between verification resends in seconds
    pub min_resend_interval: i64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_resend_interval: 60,
        }
    }
}

impl RateLimitConfig {
    /// Relaxed limits for development environments
    pub fn development() -> Self {
        Self {
            enabled: true,
            min_resend_interval: 5,
        }
    }

    /// Disable rate limiting entirely (tests only)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            min_resend_interval: 0,
        }
    }
}

fn default_enabled() -> bool {
    true
}
