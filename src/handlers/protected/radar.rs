use axum::extract::{Path, State};
use axum::Extension;

use crate::api::JsonBody;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{CreateRadarEntry, UpdateClassification, UpdateTechnology};
use crate::state::AppState;
use crate::types::RadarEntry;

/// POST /api/radar - Create an entry
///
/// Requires `title`, `status`, `quadrant` and `reason`. `description` falls
/// back to a placeholder and `private` to `false`.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    JsonBody(payload): JsonBody<CreateRadarEntry>,
) -> ApiResult<RadarEntry> {
    tracing::debug!(subject = %user.subject, "Creating radar entry");
    let created = state.radar().create(payload).await?;
    Ok(ApiResponse::created(created))
}

/// PATCH /api/radar/:id/classification - Move an entry to another status and/or quadrant
pub async fn update_classification(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateClassification>,
) -> ApiResult<RadarEntry> {
    let updated = state.radar().update_classification(&id, payload).await?;
    Ok(ApiResponse::success(updated))
}

/// PATCH /api/radar/:id/technology - Edit title, description and/or quadrant
pub async fn update_technology(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateTechnology>,
) -> ApiResult<RadarEntry> {
    let updated = state.radar().update_technology(&id, payload).await?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/radar/:id - Remove an entry; 204 with no body on success
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.radar().delete(&id).await?;
    Ok(ApiResponse::no_content())
}
