//! Session lifecycle: register, login, refresh, logout and per-request authentication

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::domain::entities::token::{Claims, TokenKind};
use crate::domain::entities::user::{NewUser, PublicUser};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::cache::RevocationCache;
use crate::services::password::{hash_password, verify_password, MAX_PASSWORD_BYTES};
use crate::services::token::{hash_token, TokenService};

use super::config::SessionConfig;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// Resolves a bearer token to the user it authorizes
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns the user id, or fails with `TokenRevoked` / `InvalidToken`
    async fn authenticate(&self, token: &str) -> DomainResult<i64>;
}

/// Session manager orchestrating the credential store, token codec and revocation cache
pub struct SessionService<U, B>
where
    U: UserRepository + ?Sized,
    B: RevocationCache + ?Sized,
{
    /// User repository for credential lookups
    user_repository: Arc<U>,
    /// Token codec
    token_service: Arc<TokenService>,
    /// Revocation ledger
    revocation_cache: Arc<B>,
    config: SessionConfig,
    /// Hash checked when the email is unknown, so both login failures cost one bcrypt verify
    pub(super) decoy_hash: OnceCell<String>,
}

impl<U, B> SessionService<U, B>
where
    U: UserRepository + ?Sized,
    B: RevocationCache + ?Sized,
{
    /// Create a new session service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Credential store
    /// * `token_service` - Signs and verifies token pairs
    /// * `revocation_cache` - Records tokens revoked before expiry
    /// * `config` - Hashing and validation settings
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService>,
        revocation_cache: Arc<B>,
        config: SessionConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            revocation_cache,
            config,
            decoy_hash: OnceCell::new(),
        }
    }

    /// Register a new user and sign them in
    ///
    /// # Arguments
    ///
    /// * `name` - Display name
    /// * `email` - Login email, stored as given
    /// * `password` - Plain password, hashed before storage
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Fresh token pair plus the public user
    /// * `Err(AuthError::EmailExists)` - The email is already registered
    /// * `Err(ValidationError)` - Missing or malformed input
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<AuthResponse> {
        self.validate_registration(name, email, password)?;

        if self.user_repository.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailExists.into());
        }

        let password_hash = hash_password(password, self.config.bcrypt_cost).await?;
        let user = self
            .user_repository
            .create(NewUser {
                email: email.to_string(),
                password_hash,
                name: name.to_string(),
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent registration of the same email
                DomainError::DuplicateKey { .. } => AuthError::EmailExists.into(),
                other => other,
            })?;

        let tokens = self.token_service.issue(user.id, &user.email)?;
        tracing::info!(user_id = user.id, "user registered");

        Ok(AuthResponse::from_token_pair(tokens, user.into()))
    }

    /// Exchange email and password for a fresh token pair.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials.into());
        }

        let Some(user) = self.user_repository.find_by_email(email).await? else {
            let decoy = self
                .decoy_hash
                .get_or_try_init(|| hash_password("decoy-password", self.config.bcrypt_cost))
                .await?;
            verify_password(password, decoy).await?;
            tracing::debug!("login rejected");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &user.password_hash).await? {
            tracing::debug!(user_id = user.id, "login rejected");
            return Err(AuthError::InvalidCredentials.into());
        }

        let tokens = self.token_service.issue(user.id, &user.email)?;
        tracing::info!(user_id = user.id, "user logged in");

        Ok(AuthResponse::from_token_pair(tokens, user.into()))
    }

    /// Rotate a refresh token into a new pair.
    ///
    /// The old refresh token is revoked after the new pair is issued. That write
    /// is best-effort: a failure is logged and the refresh still succeeds.
    ///
    /// # Errors
    ///
    /// * `InvalidToken` - bad signature, expired, or not a refresh token
    /// * `TokenRevoked` - already rotated or logged out
    /// * `UserNotFound` - the user was removed after the token was issued
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        let claims = self
            .token_service
            .verify_kind(refresh_token, TokenKind::Refresh)?;

        if self.revocation_cache.is_revoked(refresh_token).await? {
            return Err(TokenError::TokenRevoked.into());
        }

        let user_id = claims.user_id().ok_or(TokenError::InvalidToken)?;
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let tokens = self.token_service.issue(user.id, &user.email)?;
        self.revoke_best_effort(refresh_token, &claims, "refresh rotation")
            .await;

        tracing::info!(user_id = user.id, "token pair refreshed");
        Ok(AuthResponse::from_token_pair(tokens, user.into()))
    }

    /// Revoke a token for the rest of its lifetime.
    ///
    /// Accepts either kind. An already-expired token has nothing to revoke.
    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        let claims = self.token_service.verify(token)?;
        self.revoke_best_effort(token, &claims, "logout").await;
        tracing::info!(user_id = claims.user_id(), "user logged out");
        Ok(())
    }

    /// Resolve an access token to its user id.
    ///
    /// Revocation is checked before any claim in the token is trusted.
    pub async fn authenticate(&self, token: &str) -> DomainResult<i64> {
        if self.revocation_cache.is_revoked(token).await? {
            return Err(TokenError::TokenRevoked.into());
        }

        let claims = self.token_service.verify_kind(token, TokenKind::Access)?;
        claims
            .user_id()
            .ok_or_else(|| TokenError::InvalidToken.into())
    }

    /// Public profile of an authenticated user
    pub async fn current_user(&self, user_id: i64) -> DomainResult<PublicUser> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    async fn revoke_best_effort(&self, token: &str, claims: &Claims, reason: &str) {
        let ttl = self.token_service.remaining_lifetime(claims);
        if let Err(e) = self.revocation_cache.revoke(token, ttl).await {
            tracing::warn!(
                token = &hash_token(token)[..12],
                reason,
                error = %e,
                "token revocation failed; token stays valid until it expires"
            );
        }
    }

    fn validate_registration(&self, name: &str, email: &str, password: &str) -> DomainResult<()> {
        for (field, value) in [("name", name), ("email", email), ("password", password)] {
            if value.trim().is_empty() {
                return Err(ValidationError::RequiredField {
                    field: field.to_string(),
                }
                .into());
            }
        }
        if !EMAIL_REGEX.is_match(email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if password.chars().count() < self.config.min_password_length {
            return Err(ValidationError::TooShort {
                field: "password".to_string(),
                min: self.config.min_password_length,
            }
            .into());
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(ValidationError::TooLong {
                field: "password".to_string(),
                max: MAX_PASSWORD_BYTES,
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl<U, B> Authenticator for SessionService<U, B>
where
    U: UserRepository + ?Sized,
    B: RevocationCache + ?Sized,
{
    async fn authenticate(&self, token: &str) -> DomainResult<i64> {
        SessionService::authenticate(self, token).await
    }
}
