//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::PublicUser;

/// Token pair plus the public view of the user it belongs to.
///
/// Returned by register, login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// JWT refresh token for obtaining a new pair
    pub refresh_token: String,

    pub user: PublicUser,
}

impl AuthResponse {
    /// Creates an authentication response from a token pair and user
    pub fn from_token_pair(token_pair: TokenPair, user: PublicUser) -> Self {
        Self {
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
            user,
        }
    }
}
