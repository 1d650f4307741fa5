mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_reports_ok_and_iso_time() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::get(server.api("/health")).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["ok"], true);
    let time = body["time"].as_str().expect("time is a string");
    assert!(
        chrono::DateTime::parse_from_rfc3339(time).is_ok(),
        "time is not ISO-8601: {}",
        time
    );
    Ok(())
}

#[tokio::test]
async fn root_serves_banner() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::get(&server.base_url).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await?.contains("Tech-Radar API is running"));
    Ok(())
}

#[tokio::test]
async fn debug_headers_echoes_authorization_and_user_agent() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::builder().user_agent("radar-tests/1.0").build()?;

    let body = client
        .get(server.api("/debug/headers"))
        .header("authorization", "Bearer anything")
        .send()
        .await?
        .json::<Value>()
        .await?;

    assert_eq!(body["authorization"], "Bearer anything");
    assert_eq!(body["userAgent"], "radar-tests/1.0");
    Ok(())
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, server.api("/radar"))
        .header("origin", "http://localhost:4200")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "authorization,content-type")
        .send()
        .await?;

    assert!(res.status().is_success(), "preflight failed: {}", res.status());
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:4200")
    );
    Ok(())
}
