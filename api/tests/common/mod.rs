//! Shared wiring for the API integration tests: in-memory stores behind the
//! same traits the production server uses.

#![allow(dead_code, unused_macros)]

use actix_web::{http::header, test, web};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use ato_api::{AppState, HealthCheck};
use ato_core::repositories::{
    GroupRepository, MockGroupRepository, MockUserRepository, UserRepository,
};
use ato_core::services::{
    CacheStore, GroupCache, GroupService, InMemoryCacheStore, RevocationCache, SessionConfig,
    SessionService, TokenBlacklist, TokenService, TokenServiceConfig,
};
use ato_shared::CorsConfig;

pub const TEST_SECRET: &str = "api-test-secret";

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub users: Arc<MockUserRepository>,
    pub groups: Arc<MockGroupRepository>,
    pub store: Arc<InMemoryCacheStore>,
    pub tokens: Arc<TokenService>,
    pub cors: CorsConfig,
}

pub fn test_context() -> TestContext {
    test_context_with(|state| state)
}

pub fn test_context_with(customize: impl FnOnce(AppState) -> AppState) -> TestContext {
    let users = Arc::new(MockUserRepository::new());
    let groups = Arc::new(MockGroupRepository::new());
    let store = Arc::new(InMemoryCacheStore::new());
    let tokens = Arc::new(TokenService::new(TokenServiceConfig {
        jwt_secret: TEST_SECRET.to_string(),
        ..TokenServiceConfig::default()
    }));

    let user_store: Arc<dyn UserRepository> = users.clone();
    let revocations: Arc<dyn RevocationCache> = Arc::new(TokenBlacklist::new(store.clone()));
    let group_store: Arc<dyn GroupRepository> = groups.clone();
    let cache: Arc<dyn CacheStore> = store.clone();

    let sessions = Arc::new(SessionService::new(
        user_store,
        tokens.clone(),
        revocations,
        SessionConfig {
            bcrypt_cost: 4,
            ..SessionConfig::default()
        },
    ));
    let group_service = Arc::new(GroupService::new(group_store, GroupCache::new(cache)));

    TestContext {
        state: web::Data::new(customize(AppState::new(sessions, group_service))),
        users,
        groups,
        store,
        tokens,
        cors: CorsConfig::default(),
    }
}

/// Builds the app from a [`TestContext`] and initializes it as a test service
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(ato_api::create_app($ctx.state.clone(), &$ctx.cors)).await
    };
}

/// Registers a user through the API and yields their access token
macro_rules! register_user {
    ($app:expr, $email:expr) => {{
        let resp = actix_web::test::call_service(
            &$app,
            crate::common::register_request("User", $email, "password123").to_request(),
        )
        .await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        crate::common::token(&body, "access_token")
    }};
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub fn register_request(name: &str, email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(serde_json::json!({ "name": name, "email": email, "password": password }))
}

pub fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "email": email, "password": password }))
}

pub fn refresh_request(refresh_token: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(serde_json::json!({ "refresh_token": refresh_token }))
}

pub fn token(body: &Value, field: &str) -> String {
    body[field]
        .as_str()
        .unwrap_or_else(|| panic!("missing {} in {}", field, body))
        .to_string()
}

/// Probe with a fixed outcome for readiness tests
pub struct StaticHealthCheck {
    pub name: &'static str,
    pub healthy: bool,
}

#[async_trait]
impl HealthCheck for StaticHealthCheck {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn check(&self) -> Result<(), String> {
        if self.healthy {
            Ok(())
        } else {
            Err("connection refused".to_string())
        }
    }
}
