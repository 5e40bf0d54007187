use actix_web::{web, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ato_api::{create_app, AppState};
use ato_core::repositories::{GroupRepository, UserRepository};
use ato_core::services::{
    CacheStore, GroupCache, GroupService, RevocationCache, SessionConfig, SessionService,
    TokenBlacklist, TokenService, TokenServiceConfig,
};
use ato_infra::{DatabasePool, PgGroupRepository, PgUserRepository, RedisClient};
use ato_shared::{AppConfig, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting ato API server");
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set; using the development signing secret");
    }

    let database = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to PostgreSQL")?;
    database
        .run_migrations()
        .await
        .context("failed to run migrations")?;

    let redis = Arc::new(
        RedisClient::new(&config.cache)
            .await
            .context("failed to connect to Redis")?,
    );

    let users: Arc<dyn UserRepository> =
        Arc::new(PgUserRepository::new(database.get_pool().clone()));
    let group_repository: Arc<dyn GroupRepository> =
        Arc::new(PgGroupRepository::new(database.get_pool().clone()));
    let cache: Arc<dyn CacheStore> = redis.clone();
    let blacklist: Arc<dyn RevocationCache> = Arc::new(TokenBlacklist::new(cache.clone()));

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
    let sessions = Arc::new(SessionService::new(
        users,
        token_service,
        blacklist,
        SessionConfig::default(),
    ));
    let groups = Arc::new(GroupService::new(
        group_repository,
        GroupCache::with_ttl(cache, Duration::from_secs(config.cache.group_ttl)),
    ));

    let state = web::Data::new(
        AppState::new(sessions, groups)
            .with_request_timeout(Duration::from_secs(config.server.request_timeout))
            .with_health_check(Arc::new(database.clone()))
            .with_health_check(redis),
    );

    let cors = config.cors.clone();
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone(), &cors));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    database.close().await;
    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
