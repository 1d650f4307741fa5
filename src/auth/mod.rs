use axum::http::HeaderMap;
use jsonwebtoken::jwk::{AlgorithmParameters, JwkSet};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

use crate::config::AuthConfig;

/// Claims read from a verified Auth0 access token. Issuer, audience and
/// expiry are checked by [`JwtVerifier`] before these are handed out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    /// Space-separated OAuth scopes
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Authorization header must use Bearer token format")]
    MalformedHeader,

    #[error("Empty bearer token")]
    EmptyToken,

    #[error("No signing key for kid {0:?}")]
    UnknownKey(Option<String>),

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Failed to load signing keys: {0}")]
    KeyLoad(String),

    #[error("Failed to fetch JWKS: {0}")]
    Fetch(#[from] reqwest::Error),
}

enum SigningKeys {
    /// JWKS keys indexed by `kid`
    Jwks(HashMap<String, DecodingKey>),
    Single(DecodingKey),
}

/// RS256 bearer token verifier bound to one issuer and audience
pub struct JwtVerifier {
    keys: SigningKeys,
    validation: Validation,
}

impl JwtVerifier {
    fn new(keys: SigningKeys, issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Self { keys, validation }
    }

    /// Loads keys the way the configuration asks: a local PEM file when one is
    /// set, otherwise the issuer's JWKS document.
    pub async fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        if let Some(path) = &config.public_key_path {
            let pem = tokio::fs::read(path)
                .await
                .map_err(|e| AuthError::KeyLoad(format!("{}: {}", path, e)))?;
            info!("Loaded token signing key from {}", path);
            return Self::from_rsa_pem(&pem, &config.issuer, &config.audience);
        }

        let url = config.jwks_url();
        let jwks: JwkSet = reqwest::get(&url).await?.error_for_status()?.json().await?;
        info!("Loaded {} signing key(s) from {}", jwks.keys.len(), url);
        Self::from_jwks(&jwks, &config.issuer, &config.audience)
    }

    pub fn from_rsa_pem(pem: &[u8], issuer: &str, audience: &str) -> Result<Self, AuthError> {
        let key = DecodingKey::from_rsa_pem(pem).map_err(|e| AuthError::KeyLoad(e.to_string()))?;
        Ok(Self::new(SigningKeys::Single(key), issuer, audience))
    }

    /// Keeps the RSA keys that carry a `kid`; anything else in the set is ignored.
    pub fn from_jwks(jwks: &JwkSet, issuer: &str, audience: &str) -> Result<Self, AuthError> {
        let mut keys = HashMap::new();
        for jwk in &jwks.keys {
            let (Some(kid), AlgorithmParameters::RSA(_)) = (&jwk.common.key_id, &jwk.algorithm) else {
                continue;
            };
            let key = DecodingKey::from_jwk(jwk).map_err(|e| AuthError::KeyLoad(e.to_string()))?;
            keys.insert(kid.clone(), key);
        }

        if keys.is_empty() {
            return Err(AuthError::KeyLoad("JWKS contains no RSA signing keys".to_string()));
        }

        Ok(Self::new(SigningKeys::Jwks(keys), issuer, audience))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token)?;
        let key = self.key_for(header.kid.as_deref())?;
        let data = decode::<Claims>(token, key, &self.validation)?;
        Ok(data.claims)
    }

    fn key_for(&self, kid: Option<&str>) -> Result<&DecodingKey, AuthError> {
        match &self.keys {
            SigningKeys::Single(key) => Ok(key),
            SigningKeys::Jwks(keys) => match kid {
                Some(kid) => keys
                    .get(kid)
                    .ok_or_else(|| AuthError::UnknownKey(Some(kid.to_string()))),
                // A kid-less token is only unambiguous against a single key
                None => keys
                    .values()
                    .next()
                    .filter(|_| keys.len() == 1)
                    .ok_or(AuthError::UnknownKey(None)),
            },
        }
    }
}

/// Extract the bearer token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::MalformedHeader)?;

    // The scheme name is case-insensitive
    let (scheme, token) = auth_str
        .trim_start()
        .split_once(' ')
        .ok_or(AuthError::MalformedHeader)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MalformedHeader);
    }
    let token = token.trim();

    if token.is_empty() {
        return Err(AuthError::EmptyToken);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const PRIVATE_PEM: &str = include_str!("../../tests/fixtures/jwt_private.pem");
    const PUBLIC_PEM: &str = include_str!("../../tests/fixtures/jwt_public.pem");
    const JWKS: &str = include_str!("../../tests/fixtures/jwks.json");

    const ISSUER: &str = "https://tech-radar.test/";
    const AUDIENCE: &str = "https://tech-radar.api";

    #[derive(Serialize)]
    struct TestClaims<'a> {
        sub: &'a str,
        iss: &'a str,
        aud: &'a str,
        exp: i64,
        iat: i64,
    }

    fn claims<'a>(iss: &'a str, aud: &'a str, exp_offset: i64) -> TestClaims<'a> {
        let now = chrono::Utc::now().timestamp();
        TestClaims { sub: "auth0|tester", iss, aud, exp: now + exp_offset, iat: now }
    }

    fn sign(claims: &TestClaims<'_>, kid: Option<&str>) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = kid.map(str::to_string);
        let key = EncodingKey::from_rsa_pem(PRIVATE_PEM.as_bytes()).unwrap();
        encode(&header, claims, &key).unwrap()
    }

    fn pem_verifier() -> JwtVerifier {
        JwtVerifier::from_rsa_pem(PUBLIC_PEM.as_bytes(), ISSUER, AUDIENCE).unwrap()
    }

    fn jwks_verifier() -> JwtVerifier {
        let jwks: JwkSet = serde_json::from_str(JWKS).unwrap();
        JwtVerifier::from_jwks(&jwks, ISSUER, AUDIENCE).unwrap()
    }

    #[test]
    fn accepts_valid_token() {
        let token = sign(&claims(ISSUER, AUDIENCE, 300), None);
        let verified = pem_verifier().verify(&token).unwrap();
        assert_eq!(verified.sub, "auth0|tester");
        assert_eq!(verified.iss, ISSUER);
    }

    #[test]
    fn rejects_wrong_audience_and_issuer() {
        let verifier = pem_verifier();
        let token = sign(&claims(ISSUER, "https://other.api", 300), None);
        assert!(matches!(verifier.verify(&token), Err(AuthError::InvalidToken(_))));

        let token = sign(&claims("https://evil.test/", AUDIENCE, 300), None);
        assert!(matches!(verifier.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let token = sign(&claims(ISSUER, AUDIENCE, -3600), None);
        assert!(matches!(pem_verifier().verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn rejects_hs256_token() {
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims(ISSUER, AUDIENCE, 300),
            &EncodingKey::from_secret(b"shared-secret"),
        )
        .unwrap();
        assert!(pem_verifier().verify(&token).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(pem_verifier().verify("not.a.jwt").is_err());
    }

    #[test]
    fn jwks_selects_key_by_kid() {
        let verifier = jwks_verifier();
        let token = sign(&claims(ISSUER, AUDIENCE, 300), Some("test-key"));
        assert!(verifier.verify(&token).is_ok());

        let token = sign(&claims(ISSUER, AUDIENCE, 300), Some("rotated-away"));
        assert!(matches!(verifier.verify(&token), Err(AuthError::UnknownKey(Some(_)))));
    }

    #[test]
    fn jwks_with_single_key_accepts_kidless_token() {
        let token = sign(&claims(ISSUER, AUDIENCE, 300), None);
        assert!(jwks_verifier().verify(&token).is_ok());
    }

    #[test]
    fn empty_jwks_is_an_error() {
        let jwks: JwkSet = serde_json::from_str(r#"{"keys":[]}"#).unwrap();
        assert!(matches!(
            JwtVerifier::from_jwks(&jwks, ISSUER, AUDIENCE),
            Err(AuthError::KeyLoad(_))
        ));
    }

    #[test]
    fn extracts_bearer_tokens() {
        let mut headers = HeaderMap::new();
        assert!(matches!(extract_bearer_token(&headers), Err(AuthError::MissingHeader)));

        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert!(matches!(extract_bearer_token(&headers), Err(AuthError::MalformedHeader)));

        headers.insert("authorization", HeaderValue::from_static("Bearer   "));
        assert!(matches!(extract_bearer_token(&headers), Err(AuthError::EmptyToken)));

        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");

        for value in ["bearer abc.def.ghi", "BEARER abc.def.ghi"] {
            headers.insert("authorization", HeaderValue::from_static(value));
            assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi", "{value}");
        }

        headers.insert("authorization", HeaderValue::from_static("Bearerabc.def.ghi"));
        assert!(matches!(extract_bearer_token(&headers), Err(AuthError::MalformedHeader)));
    }
}
