//! Redis cache configuration

use serde::{Deserialize, Serialize};

use super::{parse_or, required, ConfigError, Lookup};

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection check timeout in seconds
    pub connection_timeout: u64,

    /// Per-command response timeout in seconds
    pub response_timeout: u64,

    /// TTL for cached group listings in seconds
    #[serde(default = "default_group_ttl")]
    pub group_ttl: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            response_timeout: 5,
            group_ttl: default_group_ttl(),
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Read `REDIS_URL` (required) and the optional `REDIS_*` overrides
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            url: required(lookup, "REDIS_URL")?,
            connection_timeout: parse_or(
                lookup,
                "REDIS_CONNECTION_TIMEOUT",
                defaults.connection_timeout,
            )?,
            response_timeout: parse_or(lookup, "REDIS_RESPONSE_TIMEOUT", defaults.response_timeout)?,
            group_ttl: parse_or(lookup, "GROUP_CACHE_TTL", defaults.group_ttl)?,
        })
    }
}

fn default_group_ttl() -> u64 {
    3600 // 1 hour
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::vars;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.connection_timeout, 5);
        assert_eq!(config.group_ttl, 3600);
    }

    #[test]
    fn test_cache_config_overrides() {
        let lookup = vars(&[
            ("REDIS_URL", "redis://cache:6379/2"),
            ("REDIS_RESPONSE_TIMEOUT", "2"),
        ]);
        let config = CacheConfig::from_lookup(&lookup).unwrap();
        assert_eq!(config.url, "redis://cache:6379/2");
        assert_eq!(config.response_timeout, 2);
        assert_eq!(config.connection_timeout, 5);
    }

    #[test]
    fn test_cache_config_requires_url() {
        let lookup = vars(&[]);
        assert_eq!(
            CacheConfig::from_lookup(&lookup).unwrap_err(),
            ConfigError::Missing("REDIS_URL")
        );
    }
}
