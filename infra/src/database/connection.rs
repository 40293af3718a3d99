//! Database connection pool management
//!
//! Connection pooling for MySQL using SQLx, configured from the shared
//! `DatabaseConfig` structure.

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::time::Duration;

use vc_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DatabasePool {
    /// SQLx MySQL connection pool
    pool: MySqlPool,
}

impl DatabasePool {
    /// Create a new database connection pool
    ///
    /// # Arguments
    /// * `config` - Database configuration settings
    ///
    /// # Returns
    /// * `Ok(DatabasePool)` - Connected pool
    /// * `Err(InfrastructureError)` - Invalid URL or connection failure
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        tracing::info!(
            max_connections = config.max_connections,
            event = "db_pool_create",
            "Creating database connection pool"
        );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect(&config.url)
            .await
            .map_err(|e| InfrastructureError::Database(format!("Failed to connect: {}", e)))?;

        Ok(Self { pool })
    }

    /// Create a pool from environment variables
    ///
    /// Loads `.env` if present, then reads `DATABASE_URL` and pool settings.
    pub async fn from_env() -> Result<Self, InfrastructureError> {
        dotenvy::dotenv().ok();
        let config = DatabaseConfig::from_env();
        Self::new(&config).await
    }

    /// Access the underlying SQLx pool
    pub fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    /// Check that the database answers a trivial query
    pub async fn health_check(&self) -> Result<(), InfrastructureError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| InfrastructureError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }
}
