//! Signing and verification of access/refresh token pairs

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};

use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Issues and verifies signed tokens.
///
/// Pure: never consults revocation state.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - Secret, algorithm and lifetimes
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Generates a new token pair (access + refresh tokens) for a user
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's id, embedded as `sub`
    /// * `email` - The user's email, embedded as a claim
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Two independently signed tokens
    /// * `Err(DomainError::Internal)` - Signing failed
    pub fn issue(&self, user_id: i64, email: &str) -> Result<TokenPair, DomainError> {
        let now = Utc::now();

        let access = Claims::new(
            user_id,
            email,
            TokenKind::Access,
            now,
            self.config.access_lifetime(),
        );
        let refresh = Claims::new(
            user_id,
            email,
            TokenKind::Refresh,
            now,
            self.config.refresh_lifetime(),
        );

        Ok(TokenPair {
            access_token: self.encode_jwt(&access)?,
            refresh_token: self.encode_jwt(&refresh)?,
        })
    }

    /// Checks signature and expiry.
    ///
    /// Every failure (malformed, bad signature, expired) is `TokenError::InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(reason = ?e.kind(), "token verification failed");
                DomainError::Token(TokenError::InvalidToken)
            })?;

        // jsonwebtoken accepts `now == exp`; a token is valid only strictly before it.
        if claims.is_expired_at(Utc::now()) || claims.user_id().is_none() {
            return Err(TokenError::InvalidToken.into());
        }
        Ok(claims)
    }

    /// Like [`verify`](Self::verify) but also requires the token kind
    pub fn verify_kind(&self, token: &str, kind: TokenKind) -> Result<Claims, DomainError> {
        let claims = self.verify(token)?;
        if claims.kind != kind {
            return Err(TokenError::InvalidToken.into());
        }
        Ok(claims)
    }

    /// Time left before the token expires; zero or negative once expired
    pub fn remaining_lifetime(&self, claims: &Claims) -> Duration {
        Duration::seconds(claims.remaining_lifetime_at(Utc::now()))
    }

    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(self.config.algorithm), claims, &self.encoding_key).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to encode token: {}", e),
            }
        })
    }
}

/// SHA-256 hex digest of a token, used wherever a token must be referenced
/// without storing or logging it.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
