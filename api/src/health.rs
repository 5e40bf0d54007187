//! Readiness probes for the production backends

use async_trait::async_trait;

use ato_infra::{DatabasePool, RedisClient};

use crate::app::HealthCheck;

#[async_trait]
impl HealthCheck for DatabasePool {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn check(&self) -> Result<(), String> {
        match self.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("unexpected SELECT 1 result".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[async_trait]
impl HealthCheck for RedisClient {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn check(&self) -> Result<(), String> {
        match self.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("unexpected PING reply".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}
