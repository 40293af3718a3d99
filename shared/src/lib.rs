//! Shared utilities and common types for the VirtCloud backend
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Boundary response structures
//! - Validation utilities (email, credential strength)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CredentialConfig, DatabaseConfig, Environment, RateLimitConfig,
    SessionConfig, TokenPolicyConfig,
};
pub use types::{ApiResponse, ErrorResponse};
pub use utils::validation;
