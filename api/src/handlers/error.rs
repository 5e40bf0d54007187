//! Translation of domain failures into JSON HTTP responses
//!
//! Every failure body is `{"error": "<message>"}`. Store and cache failures
//! are logged here and answered with an opaque 500.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use ato_core::errors::{AuthError, DomainError};
use ato_shared::ErrorResponse;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// An HTTP-ready error: status code plus the client-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
    }

    /// Mapping for the refresh endpoint, where a user deleted after the
    /// token was issued is an authentication failure rather than a lookup miss
    pub fn from_refresh(error: DomainError) -> Self {
        match error {
            DomainError::Auth(AuthError::UserNotFound) => {
                Self::unauthorized(AuthError::UserNotFound.to_string())
            }
            other => other.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(ErrorResponse::new(&self.message))
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::ValidationErr(e) => Self::bad_request(capitalize(&e.to_string())),
            DomainError::Auth(AuthError::EmailExists) => {
                Self::new(StatusCode::CONFLICT, AuthError::EmailExists.to_string())
            }
            DomainError::Auth(AuthError::InvalidCredentials) => {
                Self::unauthorized(AuthError::InvalidCredentials.to_string())
            }
            DomainError::Auth(AuthError::UserNotFound) => {
                Self::not_found(AuthError::UserNotFound.to_string())
            }
            DomainError::Token(e) => Self::unauthorized(e.to_string()),
            DomainError::NotFound { resource } => Self::not_found(format!("{} not found", resource)),
            DomainError::DuplicateKey { resource } => {
                Self::new(StatusCode::CONFLICT, format!("{} already exists", resource))
            }
            e @ (DomainError::Unavailable { .. } | DomainError::Internal { .. }) => {
                tracing::error!(error = %e, retryable = e.is_retryable(), "request failed");
                Self::internal()
            }
        }
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
