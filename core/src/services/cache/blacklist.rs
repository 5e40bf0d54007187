//! Token revocation ledger in the `blacklist:` namespace

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::DomainResult;
use crate::services::token::hash_token;

use super::traits::{CacheStore, RevocationCache};

/// Key prefix for revocation entries
pub const BLACKLIST_PREFIX: &str = "blacklist:";

/// `RevocationCache` on top of any `CacheStore`.
///
/// Keys are `blacklist:<sha256(token)>`, so raw tokens never reach the cache.
pub struct TokenBlacklist<C: CacheStore + ?Sized> {
    store: Arc<C>,
}

impl<C: CacheStore + ?Sized> TokenBlacklist<C> {
    pub fn new(store: Arc<C>) -> Self {
        Self { store }
    }

    pub(crate) fn key(token: &str) -> String {
        format!("{}{}", BLACKLIST_PREFIX, hash_token(token))
    }
}

#[async_trait]
impl<C: CacheStore + ?Sized> RevocationCache for TokenBlacklist<C> {
    async fn revoke(&self, token: &str, ttl: chrono::Duration) -> DomainResult<()> {
        let ttl = match ttl.to_std() {
            Ok(ttl) if !ttl.is_zero() => ttl,
            _ => {
                tracing::debug!("token already expired, nothing to revoke");
                return Ok(());
            }
        };

        let fingerprint = hash_token(token);
        let key = format!("{}{}", BLACKLIST_PREFIX, fingerprint);
        self.store.set(&key, "1", ttl).await?;
        tracing::debug!(token = &fingerprint[..12], ttl_secs = ttl.as_secs(), "token revoked");
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> DomainResult<bool> {
        Ok(self.store.get(&Self::key(token)).await?.is_some())
    }
}
