//! # VirtCloud Infrastructure
//!
//! Infrastructure layer for the VirtCloud backend: MySQL implementations of
//! the core repository traits and notification gateway implementations.

pub mod database;
pub mod notification;

use thiserror::Error;

pub use database::connection::DatabasePool;
pub use database::mysql::{MySqlAccountRepository, MySqlTokenRepository};
pub use notification::LoggingNotificationGateway;

/// Infrastructure-level errors raised outside the domain layer
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),
}
