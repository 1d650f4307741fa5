use axum::{
    http::{header, HeaderMap},
    response::Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderEcho {
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
}

/// GET /api/debug/headers - Echo the inbound authorization and user-agent headers
pub async fn headers(headers: HeaderMap) -> Json<HeaderEcho> {
    let read = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    Json(HeaderEcho {
        authorization: read(header::AUTHORIZATION),
        user_agent: read(header::USER_AGENT),
    })
}
