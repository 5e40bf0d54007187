//! End-to-end session lifecycle over HTTP

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use ato_core::services::token::hash_token;
use common::{bearer, login_request, refresh_request, register_request, test_context, token};

#[actix_web::test]
async fn test_alice_session_lifecycle() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        register_request("Alice", "alice@example.com", "password123").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let registered: Value = test::read_body_json(resp).await;
    assert!(registered["access_token"].is_string());
    assert!(registered["refresh_token"].is_string());
    assert_eq!(registered["user"]["email"], "alice@example.com");

    let resp = test::call_service(
        &app,
        login_request("alice@example.com", "password123").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let logged_in: Value = test::read_body_json(resp).await;
    let access = token(&logged_in, "access_token");
    assert_ne!(access, token(&registered, "access_token"));
    assert_ne!(
        token(&logged_in, "refresh_token"),
        token(&registered, "refresh_token")
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let me: Value = test::read_body_json(resp).await;
    assert_eq!(me["name"], "Alice");
    assert_eq!(me["email"], "alice@example.com");
    assert!(me.get("password_hash").is_none());
    assert!(me.get("password").is_none());

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Successfully logged out" }));

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Token has been revoked" }));
}

#[actix_web::test]
async fn test_logout_keeps_paired_refresh_token_valid() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        register_request("Bob", "bob@example.com", "password123").to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&token(&body, "access_token")))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        refresh_request(&token(&body, "refresh_token")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_logout_revocation_expires_with_the_token() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        register_request("Carol", "carol@example.com", "password123").to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let access = token(&body, "access_token");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&access))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let ttl = ctx
        .store
        .ttl(&format!("blacklist:{}", hash_token(&access)))
        .await
        .expect("revocation entry should exist");
    let access_lifetime = ctx.tokens.config().access_token_expiry_seconds as u64;
    assert!(ttl.as_secs() <= access_lifetime);
    assert!(ttl.as_secs() + 2 >= access_lifetime, "ttl = {:?}", ttl);
}

#[actix_web::test]
async fn test_refresh_rotation_is_single_use() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        register_request("Dave", "dave@example.com", "password123").to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let original = token(&body, "refresh_token");

    let resp = test::call_service(&app, refresh_request(&original).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rotated: Value = test::read_body_json(resp).await;
    assert_ne!(token(&rotated, "refresh_token"), original);
    assert_eq!(rotated["user"]["email"], "dave@example.com");

    let resp = test::call_service(&app, refresh_request(&original).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Token has been revoked" }));

    let resp = test::call_service(
        &app,
        refresh_request(&token(&rotated, "refresh_token")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_refresh_rejects_access_tokens_and_garbage() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        register_request("Erin", "erin@example.com", "password123").to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;

    for candidate in [token(&body, "access_token"), "not-a-jwt".to_string()] {
        let resp = test::call_service(&app, refresh_request(&candidate).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Invalid token" }));
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Refresh token is required" }));
}

#[actix_web::test]
async fn test_deleted_user_on_refresh_and_me() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        register_request("Frank", "frank@example.com", "password123").to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let user_id = body["user"]["id"].as_i64().unwrap();
    ctx.users.remove(user_id).await;

    let resp = test::call_service(
        &app,
        refresh_request(&token(&body, "refresh_token")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err, json!({ "error": "User not found" }));

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token(&body, "access_token")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err, json!({ "error": "User not found" }));
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let ctx = test_context();
    let app = init_app!(ctx);

    test::call_service(
        &app,
        register_request("Grace", "grace@example.com", "password123").to_request(),
    )
    .await;

    let wrong_password = test::call_service(
        &app,
        login_request("grace@example.com", "wrong-password").to_request(),
    )
    .await;
    let unknown_email = test::call_service(
        &app,
        login_request("nobody@example.com", "password123").to_request(),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let a: Value = test::read_body_json(wrong_password).await;
    let b: Value = test::read_body_json(unknown_email).await;
    assert_eq!(a, b);
    assert_eq!(a, json!({ "error": "Invalid credentials" }));
}

#[actix_web::test]
async fn test_register_validation_and_conflicts() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let cases = [
        (
            json!({ "name": "", "email": "h@example.com", "password": "password123" }),
            "Name, email, and password are required",
        ),
        (
            json!({ "name": "Heidi", "email": "h@example.com" }),
            "Name, email, and password are required",
        ),
        (
            json!({ "name": "Heidi", "email": "h@example.com", "password": "short" }),
            "Password must be at least 8 characters",
        ),
        (
            json!({ "name": "Heidi", "email": "not-an-email", "password": "password123" }),
            "Invalid email format",
        ),
    ];
    for (payload, message) in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", payload);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": message }));
    }
    assert_eq!(ctx.users.count().await, 0);

    let first = test::call_service(
        &app,
        register_request("Heidi", "heidi@example.com", "password123").to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = test::call_service(
        &app,
        register_request("Heidi 2", "heidi@example.com", "password456").to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body, json!({ "error": "Email already exists" }));
}

#[actix_web::test]
async fn test_malformed_body_is_rejected() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Invalid request body" }));
}

#[actix_web::test]
async fn test_logout_succeeds_when_revocation_write_fails() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = test::call_service(
        &app,
        register_request("Ivan", "ivan@example.com", "password123").to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let access = token(&body, "access_token");

    ctx.store.fail_writes(true);
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&access))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // Nothing was recorded, so the token stays usable until it expires
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&access))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}
