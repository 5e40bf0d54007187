//! Database configuration module

use serde::{Deserialize, Serialize};

use super::{parse_or, required, ConfigError, Lookup};

/// PostgreSQL connection pool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connections kept open while idle
    pub min_connections: u32,

    /// Acquire timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Maximum lifetime of a connection in seconds
    pub max_lifetime: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("postgres://localhost:5432/ato"),
            max_connections: 25,
            min_connections: 5,
            connect_timeout: 5,
            idle_timeout: 600,
            max_lifetime: 300,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Read `DATABASE_URL` (required) and the optional `DATABASE_*` overrides
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            url: required(lookup, "DATABASE_URL")?,
            max_connections: parse_or(lookup, "DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: parse_or(lookup, "DATABASE_MIN_CONNECTIONS", defaults.min_connections)?,
            connect_timeout: parse_or(lookup, "DATABASE_CONNECT_TIMEOUT", defaults.connect_timeout)?,
            idle_timeout: defaults.idle_timeout,
            max_lifetime: defaults.max_lifetime,
        };

        if config.min_connections > config.max_connections {
            return Err(ConfigError::Invalid {
                name: "DATABASE_MIN_CONNECTIONS",
                value: config.min_connections.to_string(),
            });
        }
        Ok(config)
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self.min_connections = self.min_connections.min(max);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::vars;

    #[test]
    fn test_pool_bounds_are_checked() {
        let lookup = vars(&[
            ("DATABASE_URL", "postgres://db/ato"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
        ]);
        let err = DatabaseConfig::from_lookup(&lookup).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "DATABASE_MIN_CONNECTIONS", .. }));
    }

    #[test]
    fn test_with_max_connections_clamps_min() {
        let config = DatabaseConfig::new("postgres://db/ato").with_max_connections(3);
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.min_connections, 3);
    }
}
