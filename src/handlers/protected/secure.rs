use axum::{response::Json, Extension};
use serde_json::{json, Value};

use crate::middleware::AuthUser;

/// GET /api/secure/me - Auth smoke test; reaching the handler means the token verified
pub async fn me(Extension(user): Extension<AuthUser>) -> Json<Value> {
    tracing::debug!(subject = %user.subject, "Secure smoke test");
    Json(json!({ "ok": true }))
}
