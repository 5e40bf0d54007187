//! Capability contracts for the key/value cache

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::DomainResult;

/// Raw TTL-keyed string store.
///
/// Implemented by Redis in production and by [`InMemoryCacheStore`](super::InMemoryCacheStore)
/// in tests. Only the namespace wrappers in this module build keys.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Store `value` under `key`, expiring after `ttl`
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> DomainResult<()>;

    /// Read a live value; `None` when absent or expired
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Delete every key matching a glob pattern (`*`, `?`). Returns the number removed.
    async fn delete_by_pattern(&self, pattern: &str) -> DomainResult<u64>;
}

/// Ledger of tokens that must be rejected before their natural expiry
#[async_trait]
pub trait RevocationCache: Send + Sync {
    /// Record `token` as revoked for `ttl`. A zero or negative ttl is a no-op.
    async fn revoke(&self, token: &str, ttl: chrono::Duration) -> DomainResult<()>;

    /// Whether a live revocation entry exists for `token`
    async fn is_revoked(&self, token: &str) -> DomainResult<bool>;
}
