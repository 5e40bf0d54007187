//! Shared configuration and wire types for the ato server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration loaded from the process environment
//! - JSON response envelopes (`{"error": ..}` / `{"message": ..}`)

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, LoggingConfig, ServerConfig,
};
pub use errors::{ErrorResponse, MessageResponse};
