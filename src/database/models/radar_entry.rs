use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::types::{InvalidLiteral, Quadrant, RadarEntry, Status};

/// Raw `radar_entries` row. Enum columns are TEXT and are parsed on the way out.
#[derive(Debug, Clone, FromRow)]
pub struct RadarEntryRow {
    pub id: Uuid,
    pub title: String,
    pub private: bool,
    pub status: String,
    pub quadrant: String,
    pub reason: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RadarEntryRow {
    pub const COLUMNS: &'static str =
        "id, title, private, status, quadrant, reason, description, created_at, updated_at";
}

impl TryFrom<RadarEntryRow> for RadarEntry {
    type Error = DatabaseError;

    fn try_from(row: RadarEntryRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |e: InvalidLiteral| DatabaseError::DataCorruption {
            id,
            reason: e.to_string(),
        };
        let status: Status = row.status.parse().map_err(corrupt)?;
        let quadrant: Quadrant = row.quadrant.parse().map_err(corrupt)?;

        Ok(RadarEntry {
            id: row.id,
            title: row.title,
            private: row.private,
            status,
            quadrant,
            reason: row.reason,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, quadrant: &str) -> RadarEntryRow {
        let now = Utc::now();
        RadarEntryRow {
            id: Uuid::new_v4(),
            title: "Kafka".into(),
            private: false,
            status: status.into(),
            quadrant: quadrant.into(),
            reason: "streaming backbone".into(),
            description: "event log".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn converts_valid_rows() {
        let entry = RadarEntry::try_from(row("hold", "platforms")).unwrap();
        assert_eq!(entry.status, Status::Hold);
        assert_eq!(entry.quadrant, Quadrant::Platforms);
    }

    #[test]
    fn flags_rows_with_unknown_literals() {
        let err = RadarEntry::try_from(row("Adopt", "platforms")).unwrap_err();
        assert!(matches!(err, DatabaseError::DataCorruption { .. }));
    }
}
