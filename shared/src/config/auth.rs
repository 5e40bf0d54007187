//! Token signing configuration

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{parse_or, ConfigError, Environment, Lookup};

const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT signing configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret used to sign and verify tokens
    pub secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,
}

// Keeps the secret out of `{:?}` output.
impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEVELOPMENT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in seconds
    pub fn with_access_expiry_seconds(mut self, seconds: i64) -> Self {
        self.access_token_expiry = seconds;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if using the development secret
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Read `JWT_SECRET` and the optional expiry overrides.
    ///
    /// Outside production a missing secret falls back to the development secret.
    pub fn from_lookup(lookup: Lookup<'_>, environment: Environment) -> Result<Self, ConfigError> {
        let secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if environment.is_production() => return Err(ConfigError::Missing("JWT_SECRET")),
            None => String::from(DEVELOPMENT_SECRET),
        };

        let defaults = JwtConfig::default();
        let access_token_expiry =
            parse_or(lookup, "JWT_ACCESS_TOKEN_EXPIRY", defaults.access_token_expiry)?;
        let refresh_token_expiry =
            parse_or(lookup, "JWT_REFRESH_TOKEN_EXPIRY", defaults.refresh_token_expiry)?;

        if access_token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_ACCESS_TOKEN_EXPIRY",
                value: access_token_expiry.to_string(),
            });
        }
        if refresh_token_expiry <= access_token_expiry {
            return Err(ConfigError::Invalid {
                name: "JWT_REFRESH_TOKEN_EXPIRY",
                value: refresh_token_expiry.to_string(),
            });
        }

        Ok(Self {
            jwt: JwtConfig {
                secret,
                access_token_expiry,
                refresh_token_expiry,
            },
        })
    }
}
