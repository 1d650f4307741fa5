use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::types::{NewRadarEntry, RadarEntry};

/// Persistence seam for radar entries.
///
/// Updates are whole-document writes with no version check, so two concurrent
/// saves of the same entry resolve as last write wins.
#[async_trait]
pub trait RadarStore: Send + Sync {
    /// All entries, newest `created_at` first
    async fn list(&self) -> Result<Vec<RadarEntry>, DatabaseError>;

    /// Stores a new entry, assigning its id and both timestamps
    async fn insert(&self, entry: NewRadarEntry) -> Result<RadarEntry, DatabaseError>;

    async fn get(&self, id: Uuid) -> Result<Option<RadarEntry>, DatabaseError>;

    /// Writes the mutable fields of `entry` and bumps `updated_at`.
    /// Returns `None` when the entry no longer exists.
    async fn save(&self, entry: &RadarEntry) -> Result<Option<RadarEntry>, DatabaseError>;

    /// Returns whether an entry was removed
    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;

    /// Releases connections on shutdown
    async fn close(&self) {}
}
