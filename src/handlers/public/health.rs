use axum::response::Json;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

/// GET / - Plain-text banner
pub async fn root() -> &'static str {
    "Tech-Radar API is running. Try /api/health"
}

/// GET /api/health - Liveness check with the server clock
pub async fn health() -> Json<Value> {
    Json(json!({
        "ok": true,
        "time": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
