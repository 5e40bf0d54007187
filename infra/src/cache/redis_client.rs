//! Redis cache client
//!
//! Multiplexed async connection with bounded timeouts and retry on transient
//! errors. Implements `CacheStore`, so the core's revocation ledger and group
//! cache both run on top of it.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use ato_core::errors::DomainResult;
use ato_core::services::CacheStore;
use ato_shared::CacheConfig;

use crate::InfrastructureError;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Keys scanned per SCAN round trip
const SCAN_BATCH: usize = 100;

/// Redis cache client with retry logic
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Per-command time budget
    response_timeout: Duration,
    /// Maximum number of attempts for operations
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Connect and verify the server answers PING within the connection timeout
    ///
    /// # Example
    /// ```no_run
    /// use ato_shared::CacheConfig;
    /// use ato_infra::cache::RedisClient;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let client = RedisClient::new(&CacheConfig::new("redis://localhost:6379")).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, 3, 100).await
    }

    /// Create a new Redis client with custom retry configuration
    pub async fn new_with_retry_config(
        config: &CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client for {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connect_timeout = Duration::from_secs(config.connection_timeout);
        let mut connection = timeout(connect_timeout, client.get_multiplexed_async_connection())
            .await
            .map_err(|_| InfrastructureError::Timeout {
                operation: "Redis connect",
                seconds: config.connection_timeout,
            })??;

        timeout(
            connect_timeout,
            redis::cmd("PING").query_async::<_, String>(&mut connection),
        )
        .await
        .map_err(|_| InfrastructureError::Timeout {
            operation: "Redis PING",
            seconds: config.connection_timeout,
        })??;

        info!("Redis client connected");
        Ok(Self {
            connection,
            response_timeout: Duration::from_secs(config.response_timeout),
            max_retries: max_retries.max(1),
            retry_delay_ms,
        })
    }

    /// Set a value with a millisecond-precision expiry
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), InfrastructureError> {
        let millis = ttl.as_millis().clamp(1, u64::MAX as u128) as u64;
        debug!("Setting key '{}' with expiry {}ms", key, millis);

        self.execute_with_retry("SET PX", |mut conn| {
            let key = key.to_string();
            let value = value.to_string();
            Box::pin(async move {
                redis::cmd("SET")
                    .arg(key)
                    .arg(value)
                    .arg("PX")
                    .arg(millis)
                    .query_async::<_, ()>(&mut conn)
                    .await
            })
        })
        .await
    }

    /// Get a value from cache
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!("Getting key '{}'", key);
        self.execute_with_retry("GET", |mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
    }

    /// Delete every key matching `pattern` using SCAN + DEL
    pub async fn delete_pattern(&self, pattern: &str) -> Result<u64, InfrastructureError> {
        debug!("Deleting keys matching '{}'", pattern);
        self.execute_with_retry("SCAN/DEL", |mut conn| {
            let pattern = pattern.to_string();
            Box::pin(async move {
                let mut cursor: u64 = 0;
                let mut deleted: u64 = 0;
                loop {
                    let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                        .arg(cursor)
                        .arg("MATCH")
                        .arg(&pattern)
                        .arg("COUNT")
                        .arg(SCAN_BATCH)
                        .query_async(&mut conn)
                        .await?;

                    if !keys.is_empty() {
                        deleted += conn.del::<_, u64>(keys).await?;
                    }
                    if next == 0 {
                        return Ok(deleted);
                    }
                    cursor = next;
                }
            })
        })
        .await
    }

    /// Remaining TTL of a key in seconds; `None` when missing or persistent
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        let ttl = self
            .execute_with_retry("TTL", |mut conn| {
                let key = key.to_string();
                Box::pin(async move { conn.ttl::<_, i64>(key).await })
            })
            .await?;
        Ok((ttl >= 0).then_some(ttl))
    }

    /// Check if the Redis connection is healthy
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let pong = self
            .execute_with_retry("PING", |mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await?;
        Ok(pong == "PONG")
    }

    async fn execute_with_retry<F, T>(
        &self,
        operation_name: &'static str,
        operation: F,
    ) -> Result<T, InfrastructureError>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            let outcome = timeout(self.response_timeout, operation(conn))
                .await
                .map_err(|_| InfrastructureError::Timeout {
                    operation: operation_name,
                    seconds: self.response_timeout.as_secs(),
                })?;

            match outcome {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis {} failed (attempt {}/{}): {}. Retrying in {}ms...",
                        operation_name, attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Redis {} failed after {} attempts: {}", operation_name, attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }
}

#[async_trait]
impl CacheStore for RedisClient {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> DomainResult<()> {
        Ok(self.set_with_expiry(key, value, ttl).await?)
    }

    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(RedisClient::get(self, key).await?)
    }

    async fn delete_by_pattern(&self, pattern: &str) -> DomainResult<u64> {
        Ok(self.delete_pattern(pattern).await?)
    }
}

pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError | redis::ErrorKind::BusyLoadingError | redis::ErrorKind::TryAgain
    )
}

/// Hide credentials in a connection URL before logging it
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.rfind('@'), url.find("://")) {
        if at_pos > proto_end {
            return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
        }
    }
    url.to_string()
}
