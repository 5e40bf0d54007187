//! # Infrastructure Layer
//!
//! Concrete adapters for the contracts defined in `ato_core`:
//! - **Database**: PostgreSQL pool and repositories using SQLx
//! - **Cache**: Redis client implementing `CacheStore`

use ato_core::errors::DomainError;

/// Cache module - Redis client
pub mod cache;

/// Database module - PostgreSQL implementations using SQLx
pub mod database;

pub use cache::RedisClient;
pub use database::{DatabasePool, PgGroupRepository, PgUserRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// An operation exceeded its time budget
    #[error("{operation} timed out after {seconds}s")]
    Timeout {
        operation: &'static str,
        seconds: u64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl InfrastructureError {
    /// Connectivity problems a caller may retry
    pub fn is_unavailable(&self) -> bool {
        match self {
            InfrastructureError::Timeout { .. } => true,
            InfrastructureError::Cache(e) => {
                e.is_io_error() || e.is_timeout() || e.is_connection_dropped() || e.is_connection_refusal()
            }
            InfrastructureError::Database(e) => matches!(
                e,
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
            ),
            InfrastructureError::Migration(_) | InfrastructureError::Config(_) => false,
        }
    }
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        if error.is_unavailable() {
            DomainError::Unavailable {
                message: error.to_string(),
            }
        } else {
            DomainError::Internal {
                message: error.to_string(),
            }
        }
    }
}
