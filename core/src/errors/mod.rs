//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// A uniqueness constraint rejected the write
    #[error("Duplicate key: {resource}")]
    DuplicateKey { resource: String },

    /// Store or cache could not be reached in time; callers may retry
    #[error("Upstream unavailable: {message}")]
    Unavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Whether retrying the same call later might succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Unavailable { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
