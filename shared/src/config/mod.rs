//! Configuration module with business-specific sub-modules
//!
//! Configuration is organized into logical areas:
//! - `auth` - session, token lifetime, and credential hashing configuration
//! - `database` - database connection and pool configuration
//! - `environment` - environment detection
//! - `rate_limit` - resend throttling for verification notifications
//!
//! All settings are explicit values passed into component constructors.
//! Core logic never reads process state directly; `from_env` constructors
//! exist only at the composition boundary.

pub mod auth;
pub mod database;
pub mod environment;
pub mod rate_limit;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, CredentialConfig, SessionConfig, TokenPolicyConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use rate_limit::RateLimitConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment the services run in
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create configuration for the development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig::new("mysql://localhost:3306/virtcloud_dev"),
            auth: AuthConfig::default(),
            rate_limit: RateLimitConfig::development(),
        }
    }

    /// Create configuration for the production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig::new("mysql://prod-db:3306/virtcloud").with_max_connections(50),
            auth: AuthConfig {
                session: SessionConfig::new("use-env-variable"),
                ..Default::default()
            },
            rate_limit: RateLimitConfig::default(),
        }
    }

    /// Load configuration appropriate for the detected environment
    pub fn from_env() -> Self {
        match Environment::from_env() {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config
            }
        }
    }
}
