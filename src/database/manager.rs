use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const CREATE_USER_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS app_user (
        id BIGSERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        role TEXT NOT NULL,
        is_immutable BOOLEAN NOT NULL DEFAULT FALSE
    )
"#;

const CREATE_ITEM_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS item (
        id BIGSERIAL PRIMARY KEY,
        item_name TEXT NOT NULL,
        item_cost INTEGER NOT NULL,
        item_quantity INTEGER NOT NULL,
        item_pack TEXT NOT NULL,
        item_content INTEGER,
        item_dimensions INTEGER NOT NULL,
        item_origin_location TEXT NOT NULL,
        item_ship BOOLEAN NOT NULL,
        item_company TEXT NOT NULL,
        item_manufacturing_date_time TIMESTAMP NOT NULL,
        item_expiry_date DATE NOT NULL
    )
"#;

/// Owns the Postgres pool for the two application tables
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Connect using the configured URL and make sure the tables exist
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        let manager = Self { pool };
        manager.ensure_schema().await?;

        info!("Connected to Postgres (max {} connections)", config.max_connections);
        Ok(manager)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_USER_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_ITEM_TABLE).execute(&self.pool).await?;
        info!("Schema ready: app_user, item");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
