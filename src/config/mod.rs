use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required env var: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://...` or `memory://` for the in-process store
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Always ends with `/`, matching the `iss` claim Auth0 issues
    pub issuer: String,
    pub audience: String,
    pub jwks_url: Option<String>,
    pub public_key_path: Option<String>,
}

impl AuthConfig {
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer: with_trailing_slash(issuer.into()),
            audience: audience.into(),
            jwks_url: None,
            public_key_path: None,
        }
    }

    /// JWKS document location, derived from the issuer unless set explicitly
    pub fn jwks_url(&self) -> String {
        self.jwks_url
            .clone()
            .unwrap_or_else(|| format!("{}.well-known/jwks.json", self.issuer))
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any key/value source. Required values are
    /// checked first, then the environment preset is overridden field by field.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let database_url = required(&lookup, "DATABASE_URL")?;
        let issuer = required(&lookup, "AUTH0_ISSUER")?;
        let audience = required(&lookup, "AUTH0_AUDIENCE")?;

        let config = match environment {
            Environment::Production => Self::production(database_url, AuthConfig::new(issuer, audience)),
            Environment::Staging => Self::staging(database_url, AuthConfig::new(issuer, audience)),
            Environment::Development => Self::development(database_url, AuthConfig::new(issuer, audience)),
        };

        config.with_overrides(&lookup)
    }

    fn with_overrides<F>(mut self, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(v) = lookup("PORT") {
            self.server.port = parse_var("PORT", v)?;
        }
        if let Some(v) = lookup("CORS_ORIGINS") {
            let origins: Vec<String> = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            // Credentialed CORS cannot use a wildcard origin
            if origins.iter().any(|o| o == "*") {
                return Err(ConfigError::Invalid { name: "CORS_ORIGINS", value: v });
            }
            self.server.cors_origins = origins;
        }
        if let Some(v) = lookup("API_MAX_REQUEST_SIZE_BYTES") {
            self.server.max_request_size_bytes = parse_var("API_MAX_REQUEST_SIZE_BYTES", v)?;
        }

        // Database overrides
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", v)?;
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse_var("DATABASE_CONNECTION_TIMEOUT", v)?;
        }

        // Auth overrides
        if let Some(v) = lookup("AUTH0_JWKS_URL").filter(|v| !v.trim().is_empty()) {
            self.auth.jwks_url = Some(v.trim().to_string());
        }
        if let Some(v) = lookup("AUTH0_PUBLIC_KEY_PATH").filter(|v| !v.trim().is_empty()) {
            self.auth.public_key_path = Some(v.trim().to_string());
        }

        Ok(self)
    }

    pub fn development(database_url: impl Into<String>, auth: AuthConfig) -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                cors_origins: vec!["http://localhost:4200".to_string()],
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            database: DatabaseConfig {
                url: database_url.into(),
                max_connections: 10,
                connection_timeout: 10,
            },
            auth,
        }
    }

    pub fn staging(database_url: impl Into<String>, auth: AuthConfig) -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 3000,
                cors_origins: vec!["http://localhost:4200".to_string()],
                max_request_size_bytes: 512 * 1024,
            },
            database: DatabaseConfig {
                url: database_url.into(),
                max_connections: 20,
                connection_timeout: 10,
            },
            auth,
        }
    }

    pub fn production(database_url: impl Into<String>, auth: AuthConfig) -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 3000,
                cors_origins: vec!["http://localhost:4200".to_string()],
                max_request_size_bytes: 256 * 1024,
            },
            database: DatabaseConfig {
                url: database_url.into(),
                max_connections: 50,
                connection_timeout: 5,
            },
            auth,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

fn with_trailing_slash(url: String) -> String {
    if url.ends_with('/') {
        url
    } else {
        format!("{}/", url)
    }
}
