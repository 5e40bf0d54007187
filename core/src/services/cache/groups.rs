//! Read-through cache for group listings in the `groups:` namespace

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::group::Group;
use crate::errors::{DomainError, DomainResult};

use super::traits::CacheStore;

/// Key prefix for cached group listings
pub const GROUPS_PREFIX: &str = "groups:";

/// Default lifetime of a cached listing
pub const DEFAULT_GROUP_TTL: Duration = Duration::from_secs(3600);

/// Per-user group listing cache
pub struct GroupCache<C: CacheStore + ?Sized> {
    store: Arc<C>,
    ttl: Duration,
}

impl<C: CacheStore + ?Sized> GroupCache<C> {
    pub fn new(store: Arc<C>) -> Self {
        Self::with_ttl(store, DEFAULT_GROUP_TTL)
    }

    pub fn with_ttl(store: Arc<C>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub(crate) fn key(user_id: i64) -> String {
        format!("{}user:{}", GROUPS_PREFIX, user_id)
    }

    /// Cached listing for a user. An undecodable entry reads as a miss.
    pub async fn get(&self, user_id: i64) -> DomainResult<Option<Vec<Group>>> {
        let Some(raw) = self.store.get(&Self::key(user_id)).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(groups) => Ok(Some(groups)),
            Err(e) => {
                tracing::warn!(user_id, error = %e, "discarding corrupt group cache entry");
                Ok(None)
            }
        }
    }

    pub async fn set(&self, user_id: i64, groups: &[Group]) -> DomainResult<()> {
        let payload = serde_json::to_string(groups).map_err(|e| DomainError::Internal {
            message: format!("Failed to serialize groups: {}", e),
        })?;
        self.store.set(&Self::key(user_id), &payload, self.ttl).await
    }

    /// Drop one user's cached listing
    pub async fn invalidate(&self, user_id: i64) -> DomainResult<()> {
        self.store.delete_by_pattern(&Self::key(user_id)).await?;
        Ok(())
    }

    /// Drop every cached listing; never touches other namespaces
    pub async fn invalidate_all(&self) -> DomainResult<u64> {
        self.store
            .delete_by_pattern(&format!("{}user:*", GROUPS_PREFIX))
            .await
    }
}
