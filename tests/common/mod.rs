#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};

pub const ISSUER: &str = "https://tech-radar.test/";
pub const AUDIENCE: &str = "https://tech-radar.api";
pub const PRIVATE_PEM: &str = include_str!("../fixtures/jwt_private.pem");
pub const JWKS: &str = include_str!("../fixtures/jwks.json");

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let public_key = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/jwt_public.pem");

        // In-memory store and a local signing key keep the server self-contained
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tech-radar-api"));
        cmd.env("PORT", port.to_string())
            .env("DATABASE_URL", "memory://")
            .env("AUTH0_ISSUER", ISSUER)
            .env("AUTH0_AUDIENCE", AUDIENCE)
            .env("AUTH0_PUBLIC_KEY_PATH", public_key)
            .env("APP_ENV", "development")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/api/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn api(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

#[derive(Serialize)]
struct TokenClaims<'a> {
    sub: &'a str,
    iss: &'a str,
    aud: &'a str,
    exp: i64,
    iat: i64,
}

/// Sign an access token the way the identity provider would
pub fn mint_token_with(iss: &str, aud: &str, exp_offset_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = TokenClaims {
        sub: "auth0|integration",
        iss,
        aud,
        exp: now + exp_offset_secs,
        iat: now,
    };
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some("test-key".to_string());
    let key = EncodingKey::from_rsa_pem(PRIVATE_PEM.as_bytes()).expect("valid test private key");
    encode(&header, &claims, &key).expect("token signs")
}

pub fn mint_token() -> String {
    mint_token_with(ISSUER, AUDIENCE, 600)
}

/// A unique title so tests sharing one server never collide
pub fn unique_title(prefix: &str) -> String {
    format!("{} {}", prefix, uuid::Uuid::new_v4().simple())
}

pub fn entry_payload(title: &str, status: &str, quadrant: &str) -> Value {
    json!({
        "title": title,
        "status": status,
        "quadrant": quadrant,
        "reason": "evaluation",
        "description": "created by an integration test"
    })
}

pub async fn create_entry(
    client: &reqwest::Client,
    server: &TestServer,
    payload: &Value,
) -> Result<Value> {
    let res = client
        .post(server.api("/radar"))
        .bearer_auth(mint_token())
        .json(payload)
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed with {}", res.status());
    Ok(res.json::<Value>().await?)
}

pub async fn list_entries(client: &reqwest::Client, server: &TestServer) -> Result<Vec<Value>> {
    let res = client.get(server.api("/radar")).send().await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "list failed with {}", res.status());
    Ok(res.json::<Vec<Value>>().await?)
}
