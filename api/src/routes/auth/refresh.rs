use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::{validate_request, RefreshTokenRequest};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/refresh
///
/// Rotates the refresh token: the presented token is revoked once the new
/// pair is issued.
///
/// ## Errors
/// - 400 Bad Request: Missing refresh token
/// - 401 Unauthorized: Invalid token, revoked token, or user no longer exists
pub async fn refresh(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*request)?;

    let response = state
        .sessions
        .refresh(&request.refresh_token)
        .await
        .map_err(ApiError::from_refresh)?;

    Ok(HttpResponse::Ok().json(response))
}
