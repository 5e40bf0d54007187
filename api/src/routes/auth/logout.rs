use actix_web::{web, HttpResponse};

use ato_shared::MessageResponse;

use crate::app::AppState;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the bearer token for the rest of its lifetime.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
///
/// ## Success (200 OK)
/// ```json
/// { "message": "Successfully logged out" }
/// ```
pub async fn logout(
    state: web::Data<AppState>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    state.sessions.logout(&auth.token).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Successfully logged out")))
}
