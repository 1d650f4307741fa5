use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::services::{CreateRadarEntry, UpdateClassification, UpdateTechnology};
use crate::types::RadarEntry;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecureMeResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugHeaders {
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
}

/// Typed client for the `/api` routes. The bearer token, when set, is sent on
/// every request.
#[derive(Debug, Clone)]
pub struct RadarClient {
    http: reqwest::Client,
    base: String,
    token: Option<String>,
}

impl RadarClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base,
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.send(self.http.get(self.url("/health"))).await
    }

    pub async fn secure_me(&self) -> Result<SecureMeResponse, ClientError> {
        self.send(self.http.get(self.url("/secure/me"))).await
    }

    pub async fn list_radar(&self) -> Result<Vec<RadarEntry>, ClientError> {
        self.send(self.http.get(self.url("/radar"))).await
    }

    pub async fn create_radar(&self, body: &CreateRadarEntry) -> Result<RadarEntry, ClientError> {
        self.send(self.http.post(self.url("/radar")).json(body)).await
    }

    pub async fn delete_radar(&self, id: &str) -> Result<(), ClientError> {
        let request = self.http.delete(self.url(&format!("/radar/{}", id)));
        self.execute(request).await?;
        Ok(())
    }

    pub async fn update_classification(
        &self,
        id: &str,
        body: &UpdateClassification,
    ) -> Result<RadarEntry, ClientError> {
        let url = self.url(&format!("/radar/{}/classification", id));
        self.send(self.http.patch(url).json(body)).await
    }

    pub async fn update_technology(
        &self,
        id: &str,
        body: &UpdateTechnology,
    ) -> Result<RadarEntry, ClientError> {
        let url = self.url(&format!("/radar/{}/technology", id));
        self.send(self.http.patch(url).json(body)).await
    }

    pub async fn debug_headers(&self) -> Result<DebugHeaders, ClientError> {
        self.send(self.http.get(self.url("/debug/headers"))).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        Ok(self.execute(request).await?.json::<T>().await?)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        // Server errors carry {"error": ..., "code": ...}; fall back to the raw body
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or(text);

        Err(ClientError::Api { status, message })
    }
}
