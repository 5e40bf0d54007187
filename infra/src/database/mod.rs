//! Database module - PostgreSQL implementations using SQLx
//!
//! - Connection pool management
//! - Repository implementations for users and groups
//! - Embedded migrations

pub mod connection;
pub mod postgres;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use postgres::{PgGroupRepository, PgUserRepository};
