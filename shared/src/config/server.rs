//! HTTP listener and CORS configuration

use serde::{Deserialize, Serialize};

use super::{parse_or, ConfigError, Lookup};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,

    /// Overall request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0,
            request_timeout: default_request_timeout(),
        }
    }
}

impl ServerConfig {
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(lookup, "PORT", defaults.port)?,
            workers: parse_or(lookup, "WORKERS", defaults.workers)?,
            request_timeout: parse_or(lookup, "REQUEST_TIMEOUT", defaults.request_timeout)?,
        })
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins
    pub allowed_origins: Vec<String>,

    /// Allowed methods
    pub allowed_methods: Vec<String>,

    /// Allowed headers
    pub allowed_headers: Vec<String>,

    /// Exposed headers
    pub exposed_headers: Vec<String>,

    /// Allow credentials
    pub allow_credentials: bool,

    /// Max age for preflight cache in seconds
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            allowed_methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            allowed_headers: ["Accept", "Authorization", "Content-Type"]
                .iter()
                .map(|h| h.to_string())
                .collect(),
            exposed_headers: vec!["Link".to_string()],
            allow_credentials: true,
            max_age: 300,
        }
    }
}

impl CorsConfig {
    /// Local frontends plus `FRONTEND_URL` and the comma separated `ALLOWED_ORIGINS`
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        let mut config = Self::default();

        let extra = lookup("FRONTEND_URL")
            .into_iter()
            .chain(lookup("ALLOWED_ORIGINS"))
            .flat_map(|value| {
                value
                    .split(',')
                    .map(|origin| origin.trim().trim_end_matches('/').to_string())
                    .collect::<Vec<_>>()
            })
            .filter(|origin| !origin.is_empty());

        for origin in extra {
            if !config.allowed_origins.contains(&origin) {
                config.allowed_origins.push(origin);
            }
        }
        config
    }
}

fn default_request_timeout() -> u64 {
    60
}
