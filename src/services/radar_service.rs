use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::store::RadarStore;
use crate::types::{InvalidLiteral, NewRadarEntry, Quadrant, RadarEntry, Status};

/// Minimum trimmed length for a title set through a technology edit
pub const MIN_TITLE_LEN: usize = 3;

/// Minimum trimmed length for a reclassification reason
pub const MIN_REASON_LEN: usize = 2;

/// Stored when an entry is created without a description
pub const DEFAULT_DESCRIPTION: &str = "No description provided.";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    InvalidLiteral(#[from] InvalidLiteral),

    #[error("{0}")]
    NoChange(&'static str),

    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Body of `POST /api/radar`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRadarEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quadrant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PATCH /api/radar/:id/classification`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClassification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quadrant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Body of `PATCH /api/radar/:id/technology`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTechnology {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quadrant: Option<String>,
}

/// A parsed classification request, before it is compared to the stored entry
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationChange {
    pub status: Option<Status>,
    pub quadrant: Option<Quadrant>,
    pub reason: String,
}

/// A parsed technology request, before it is compared to the stored entry
#[derive(Debug, Clone, PartialEq)]
pub struct TechnologyChange {
    pub title: Option<String>,
    pub description: Option<String>,
    pub quadrant: Option<Quadrant>,
}

/// Trimmed value, or `None` when absent or blank
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalize_description(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string())
}

/// Presence first, then the status literal, then the quadrant literal.
/// Title length is not enforced here.
pub fn validate_create(req: CreateRadarEntry) -> Result<NewRadarEntry, ServiceError> {
    let title = non_blank(req.title);
    let status = req.status.filter(|s| !s.is_empty());
    let quadrant = req.quadrant.filter(|q| !q.is_empty());
    let reason = non_blank(req.reason);

    let (Some(title), Some(status), Some(quadrant), Some(reason)) = (title, status, quadrant, reason)
    else {
        return Err(ServiceError::Validation(
            "Invalid payload. A title, a status, the quadrant and a reason are required".to_string(),
        ));
    };

    Ok(NewRadarEntry {
        title,
        private: req.private.unwrap_or(false),
        status: status.parse::<Status>()?,
        quadrant: quadrant.parse::<Quadrant>()?,
        reason,
        description: normalize_description(req.description),
    })
}

impl ClassificationChange {
    /// Reason first, then literals. Existence is checked later by the caller.
    pub fn parse(req: UpdateClassification) -> Result<Self, ServiceError> {
        let reason = non_blank(req.reason).ok_or_else(|| {
            ServiceError::Validation("A reason is required to change the classification".to_string())
        })?;
        if reason.chars().count() < MIN_REASON_LEN {
            return Err(ServiceError::Validation(format!(
                "Reason must be at least {} characters",
                MIN_REASON_LEN
            )));
        }

        Ok(Self {
            status: req.status.map(|s| s.parse::<Status>()).transpose()?,
            quadrant: req.quadrant.map(|q| q.parse::<Quadrant>()).transpose()?,
            reason,
        })
    }

    /// Applies the change to `entry`, or fails when neither status nor
    /// quadrant differs from the stored values.
    pub fn apply(&self, entry: &mut RadarEntry) -> Result<(), ServiceError> {
        let status_changed = self.status.is_some_and(|s| s != entry.status);
        let quadrant_changed = self.quadrant.is_some_and(|q| q != entry.quadrant);

        if !status_changed && !quadrant_changed {
            return Err(ServiceError::NoChange(
                "No change: status and quadrant already match the stored values",
            ));
        }

        if let Some(status) = self.status {
            entry.status = status;
        }
        if let Some(quadrant) = self.quadrant {
            entry.quadrant = quadrant;
        }
        entry.reason = self.reason.clone();
        Ok(())
    }
}

impl TechnologyChange {
    pub fn parse(req: UpdateTechnology) -> Result<Self, ServiceError> {
        let title = match req.title {
            Some(title) => {
                let title = title.trim().to_string();
                if title.chars().count() < MIN_TITLE_LEN {
                    return Err(ServiceError::Validation(format!(
                        "Title must be at least {} characters",
                        MIN_TITLE_LEN
                    )));
                }
                Some(title)
            }
            None => None,
        };

        Ok(Self {
            title,
            description: req.description.map(|d| normalize_description(Some(d))),
            quadrant: req.quadrant.map(|q| q.parse::<Quadrant>()).transpose()?,
        })
    }

    pub fn apply(&self, entry: &mut RadarEntry) -> Result<(), ServiceError> {
        let title_changed = self.title.as_ref().is_some_and(|t| *t != entry.title);
        let description_changed = self.description.as_ref().is_some_and(|d| *d != entry.description);
        let quadrant_changed = self.quadrant.is_some_and(|q| q != entry.quadrant);

        if !title_changed && !description_changed && !quadrant_changed {
            return Err(ServiceError::NoChange(
                "No change: title, description and quadrant already match the stored values",
            ));
        }

        if let Some(title) = &self.title {
            entry.title = title.clone();
        }
        if let Some(description) = &self.description {
            entry.description = description.clone();
        }
        if let Some(quadrant) = self.quadrant {
            entry.quadrant = quadrant;
        }
        Ok(())
    }
}

/// Radar CRUD over a [`RadarStore`]
#[derive(Clone)]
pub struct RadarService {
    store: Arc<dyn RadarStore>,
}

impl RadarService {
    pub fn new(store: Arc<dyn RadarStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<RadarEntry>, ServiceError> {
        Ok(self.store.list().await?)
    }

    pub async fn create(&self, req: CreateRadarEntry) -> Result<RadarEntry, ServiceError> {
        let entry = validate_create(req)?;
        let created = self.store.insert(entry).await?;
        info!(id = %created.id, title = %created.title, "Created radar entry");
        Ok(created)
    }

    pub async fn update_classification(
        &self,
        id: &str,
        req: UpdateClassification,
    ) -> Result<RadarEntry, ServiceError> {
        let change = ClassificationChange::parse(req)?;
        let mut entry = self.load(id).await?;
        change.apply(&mut entry)?;

        let saved = self.save(&entry).await?;
        info!(
            id = %saved.id,
            status = %saved.status,
            quadrant = %saved.quadrant,
            "Reclassified radar entry"
        );
        Ok(saved)
    }

    pub async fn update_technology(
        &self,
        id: &str,
        req: UpdateTechnology,
    ) -> Result<RadarEntry, ServiceError> {
        let change = TechnologyChange::parse(req)?;
        let mut entry = self.load(id).await?;
        change.apply(&mut entry)?;

        let saved = self.save(&entry).await?;
        info!(id = %saved.id, "Updated radar technology");
        Ok(saved)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let id = parse_id(id)?;
        if !self.store.delete(id).await? {
            return Err(ServiceError::NotFound);
        }
        info!(%id, "Deleted radar entry");
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<RadarEntry, ServiceError> {
        let id = parse_id(id)?;
        self.store.get(id).await?.ok_or(ServiceError::NotFound)
    }

    // The entry can disappear between load and save
    async fn save(&self, entry: &RadarEntry) -> Result<RadarEntry, ServiceError> {
        self.store.save(entry).await?.ok_or(ServiceError::NotFound)
    }
}

/// Identifiers that are not UUIDs cannot name a stored entry
fn parse_id(id: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(id).map_err(|_| ServiceError::NotFound)
}
