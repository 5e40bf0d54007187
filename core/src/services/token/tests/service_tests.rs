//! Unit tests for token service

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::{DomainError, TokenError};
use crate::services::token::{hash_token, TokenService, TokenServiceConfig};

const SECRET: &str = "test-secret";

fn create_test_service() -> TokenService {
    TokenService::new(TokenServiceConfig {
        jwt_secret: SECRET.to_string(),
        ..TokenServiceConfig::default()
    })
}

fn sign(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn is_invalid(err: DomainError) -> bool {
    matches!(err, DomainError::Token(TokenError::InvalidToken))
}

#[test]
fn test_issue_and_verify_pair() {
    let service = create_test_service();
    let pair = service.issue(7, "alice@example.com").unwrap();

    assert_ne!(pair.access_token, pair.refresh_token);

    let access = service.verify(&pair.access_token).unwrap();
    assert_eq!(access.user_id(), Some(7));
    assert_eq!(access.email, "alice@example.com");
    assert_eq!(access.kind, TokenKind::Access);
    assert_eq!(access.exp - access.iat, 900);

    let refresh = service.verify(&pair.refresh_token).unwrap();
    assert_eq!(refresh.kind, TokenKind::Refresh);
    assert_eq!(refresh.exp - refresh.iat, 604800);
}

#[test]
fn test_consecutive_pairs_differ() {
    let service = create_test_service();
    let first = service.issue(1, "a@example.com").unwrap();
    let second = service.issue(1, "a@example.com").unwrap();
    assert_ne!(first.access_token, second.access_token);
    assert_ne!(first.refresh_token, second.refresh_token);
}

#[test]
fn test_malformed_token() {
    let service = create_test_service();
    assert!(is_invalid(service.verify("not.a.jwt").unwrap_err()));
    assert!(is_invalid(service.verify("").unwrap_err()));
}

#[test]
fn test_wrong_signature() {
    let service = create_test_service();
    let claims = Claims::new(1, "a@example.com", TokenKind::Access, Utc::now(), Duration::minutes(5));
    let forged = sign(&claims, "some-other-secret");
    assert!(is_invalid(service.verify(&forged).unwrap_err()));
}

#[test]
fn test_expired_token() {
    let service = create_test_service();
    let issued = Utc::now() - Duration::minutes(30);
    let claims = Claims::new(1, "a@example.com", TokenKind::Access, issued, Duration::minutes(15));
    let token = sign(&claims, SECRET);
    assert!(is_invalid(service.verify(&token).unwrap_err()));
}

#[test]
fn test_tampered_payload() {
    let service = create_test_service();
    let pair = service.issue(1, "a@example.com").unwrap();

    let mut parts: Vec<String> = pair.access_token.split('.').map(String::from).collect();
    let other = service.issue(2, "b@example.com").unwrap();
    parts[1] = other.access_token.split('.').nth(1).unwrap().to_string();

    assert!(is_invalid(service.verify(&parts.join(".")).unwrap_err()));
}

#[test]
fn test_verify_kind() {
    let service = create_test_service();
    let pair = service.issue(3, "c@example.com").unwrap();

    assert!(service.verify_kind(&pair.refresh_token, TokenKind::Refresh).is_ok());
    assert!(is_invalid(
        service
            .verify_kind(&pair.access_token, TokenKind::Refresh)
            .unwrap_err()
    ));
}

#[test]
fn test_remaining_lifetime() {
    let service = TokenService::new(TokenServiceConfig {
        jwt_secret: SECRET.to_string(),
        access_token_expiry_seconds: 10,
        ..TokenServiceConfig::default()
    });
    let pair = service.issue(1, "a@example.com").unwrap();
    let claims = service.verify(&pair.access_token).unwrap();

    let remaining = service.remaining_lifetime(&claims).num_seconds();
    assert!((9..=10).contains(&remaining), "remaining = {}", remaining);
}

#[test]
fn test_hash_token_is_stable_hex() {
    let a = hash_token("abc");
    assert_eq!(a.len(), 64);
    assert_eq!(a, hash_token("abc"));
    assert_ne!(a, hash_token("abd"));
}
