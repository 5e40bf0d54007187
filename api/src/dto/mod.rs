//! Request bodies and their field checks

pub mod auth;
pub mod group;

pub use auth::{LoginRequest, RefreshTokenRequest, RegisterRequest};
pub use group::{CreateGroupRequest, UpdateGroupNameRequest, UpdateGroupPositionRequest};

use validator::{Validate, ValidationErrors};

use crate::handlers::ApiError;

/// Run the derived checks and turn the first failure into a 400
pub fn validate_request<T: Validate>(request: &T) -> Result<(), ApiError> {
    request
        .validate()
        .map_err(|errors| ApiError::bad_request(first_message(&errors)))
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid request body".to_string())
}
