//! Database connection management
//!
//! Each service owns its pool privately; nothing is shared across the
//! service boundary except value snapshots.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// PostgreSQL database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new connection pool sized per the service's config
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await?;

        tracing::info!(max_connections, "PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
