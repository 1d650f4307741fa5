use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::RadarEntry;

/// GET /api/radar - All entries, newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<RadarEntry>> {
    let entries = state.radar().list().await?;
    Ok(ApiResponse::success(entries))
}
