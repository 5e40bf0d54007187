//! Application state and factory

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse},
    http::StatusCode,
    web, App, HttpResponse,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

use ato_core::repositories::{GroupRepository, UserRepository};
use ato_core::services::{Authenticator, CacheStore, GroupService, RevocationCache, SessionService};
use ato_shared::{CorsConfig, ErrorResponse};

use crate::handlers::ApiError;
use crate::middleware::create_cors;
use crate::routes;

/// Session manager over whichever credential store and revocation ledger were wired in
pub type Sessions = SessionService<dyn UserRepository, dyn RevocationCache>;

/// Group service over whichever repository and cache store were wired in
pub type Groups = GroupService<dyn GroupRepository, dyn CacheStore>;

/// A dependency probed by `GET /health/ready`
#[async_trait]
pub trait HealthCheck: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(&self) -> Result<(), String>;
}

/// Upper bound on handling a single request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared application state handed to every handler
pub struct AppState {
    pub sessions: Arc<Sessions>,
    pub groups: Arc<Groups>,
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(sessions: Arc<Sessions>, groups: Arc<Groups>) -> Self {
        Self {
            sessions,
            groups,
            health_checks: Vec::new(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let authenticator: Arc<dyn Authenticator> = state.sessions.clone();
    let request_timeout = state.request_timeout;

    App::new()
        .app_data(state)
        .app_data(web::Data::from(authenticator))
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            tracing::debug!(error = %err, "rejected request body");
            ApiError::bad_request("Invalid request body").into()
        }))
        .wrap_fn(move |req, srv| {
            let call = srv.call(req);
            async move {
                match tokio::time::timeout(request_timeout, call).await {
                    Ok(result) => result,
                    Err(_) => {
                        tracing::warn!(?request_timeout, "request timed out");
                        Err(ApiError::new(StatusCode::GATEWAY_TIMEOUT, "Request timed out").into())
                    }
                }
            }
        })
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .route("/health/ready", web::get().to(readiness_check))
        .service(
            web::scope("/api/v1")
                .configure(routes::auth::configure)
                .configure(routes::groups::configure),
        )
        .default_service(web::route().to(not_found))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("OK")
}

/// Pings every registered dependency; 503 when any of them fails
async fn readiness_check(state: web::Data<AppState>) -> HttpResponse {
    let mut checks = serde_json::Map::new();
    let mut healthy = true;

    for probe in &state.health_checks {
        let status = match probe.check().await {
            Ok(()) => "ok".to_string(),
            Err(e) => {
                tracing::warn!(dependency = probe.name(), error = %e, "readiness check failed");
                healthy = false;
                "unavailable".to_string()
            }
        };
        checks.insert(probe.name().to_string(), serde_json::Value::String(status));
    }

    let body = serde_json::json!({
        "status": if healthy { "ready" } else { "degraded" },
        "checks": checks,
    });
    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Not found"))
}
