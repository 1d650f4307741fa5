use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::database::memory::MemoryRadarStore;
use crate::database::repository::PgRadarStore;
use crate::database::store::RadarStore;

/// Errors from the radar stores
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Unsupported database scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Corrupt radar entry {id}: {reason}")]
    DataCorruption { id: Uuid, reason: String },

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Which store a `DATABASE_URL` selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

/// Opens the radar store named by the configuration
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connects, runs migrations and returns the store. Any failure here is
    /// meant to abort startup.
    pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn RadarStore>, DatabaseError> {
        match Self::store_kind(&config.url)? {
            StoreKind::Memory => {
                info!("Using in-memory radar store");
                Ok(Arc::new(MemoryRadarStore::new()))
            }
            StoreKind::Postgres => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(Duration::from_secs(config.connection_timeout))
                    .connect(&config.url)
                    .await?;

                sqlx::migrate!("./migrations").run(&pool).await?;
                info!("Connected to PostgreSQL radar store");

                Ok(Arc::new(PgRadarStore::new(pool)))
            }
        }
    }

    fn store_kind(database_url: &str) -> Result<StoreKind, DatabaseError> {
        let url = url::Url::parse(database_url)
            .map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?;

        match url.scheme() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            other => Err(DatabaseError::UnsupportedScheme(other.to_string())),
        }
    }
}
