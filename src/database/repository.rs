use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::RadarEntryRow;
use crate::database::store::RadarStore;
use crate::types::{NewRadarEntry, RadarEntry};

/// `radar_entries` table in PostgreSQL
pub struct PgRadarStore {
    pool: PgPool,
}

impl PgRadarStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RadarStore for PgRadarStore {
    async fn list(&self) -> Result<Vec<RadarEntry>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM radar_entries ORDER BY created_at DESC",
            RadarEntryRow::COLUMNS
        );

        sqlx::query_as::<_, RadarEntryRow>(&sql)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(RadarEntry::try_from)
            .collect()
    }

    async fn insert(&self, entry: NewRadarEntry) -> Result<RadarEntry, DatabaseError> {
        let sql = format!(
            "INSERT INTO radar_entries (id, title, private, status, quadrant, reason, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            RadarEntryRow::COLUMNS
        );

        let row = sqlx::query_as::<_, RadarEntryRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&entry.title)
            .bind(entry.private)
            .bind(entry.status.as_str())
            .bind(entry.quadrant.as_str())
            .bind(&entry.reason)
            .bind(&entry.description)
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn get(&self, id: Uuid) -> Result<Option<RadarEntry>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM radar_entries WHERE id = $1",
            RadarEntryRow::COLUMNS
        );

        sqlx::query_as::<_, RadarEntryRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(RadarEntry::try_from)
            .transpose()
    }

    async fn save(&self, entry: &RadarEntry) -> Result<Option<RadarEntry>, DatabaseError> {
        let sql = format!(
            "UPDATE radar_entries
             SET title = $2, private = $3, status = $4, quadrant = $5,
                 reason = $6, description = $7, updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            RadarEntryRow::COLUMNS
        );

        sqlx::query_as::<_, RadarEntryRow>(&sql)
            .bind(entry.id)
            .bind(&entry.title)
            .bind(entry.private)
            .bind(entry.status.as_str())
            .bind(entry.quadrant.as_str())
            .bind(&entry.reason)
            .bind(&entry.description)
            .fetch_optional(&self.pool)
            .await?
            .map(RadarEntry::try_from)
            .transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM radar_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Closed PostgreSQL pool");
    }
}
