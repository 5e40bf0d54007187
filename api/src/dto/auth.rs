use serde::Deserialize;
use validator::Validate;

/// Body of `POST /auth/register`. Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name, email, and password are required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Name, email, and password are required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Name, email, and password are required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}
