use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::store::RadarStore;
use crate::types::{NewRadarEntry, RadarEntry};

/// In-process store selected by `DATABASE_URL=memory://`. Contents are lost
/// on restart.
#[derive(Default)]
pub struct MemoryRadarStore {
    // Insertion order
    entries: RwLock<Vec<RadarEntry>>,
}

impl MemoryRadarStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RadarStore for MemoryRadarStore {
    async fn list(&self) -> Result<Vec<RadarEntry>, DatabaseError> {
        let entries = self.entries.read().await;
        // Reversed first so equal timestamps still come out newest-inserted first
        let mut list: Vec<RadarEntry> = entries.iter().rev().cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn insert(&self, entry: NewRadarEntry) -> Result<RadarEntry, DatabaseError> {
        let now = Utc::now();
        let stored = RadarEntry {
            id: Uuid::new_v4(),
            title: entry.title,
            private: entry.private,
            status: entry.status,
            quadrant: entry.quadrant,
            reason: entry.reason,
            description: entry.description,
            created_at: now,
            updated_at: now,
        };

        self.entries.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: Uuid) -> Result<Option<RadarEntry>, DatabaseError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().find(|e| e.id == id).cloned())
    }

    async fn save(&self, entry: &RadarEntry) -> Result<Option<RadarEntry>, DatabaseError> {
        let mut entries = self.entries.write().await;
        let Some(stored) = entries.iter_mut().find(|e| e.id == entry.id) else {
            return Ok(None);
        };

        stored.title = entry.title.clone();
        stored.private = entry.private;
        stored.status = entry.status;
        stored.quadrant = entry.quadrant;
        stored.reason = entry.reason.clone();
        stored.description = entry.description.clone();
        stored.updated_at = Utc::now();

        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        Ok(entries.len() != before)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
