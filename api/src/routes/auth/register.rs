use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::{validate_request, RegisterRequest};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/register
///
/// Creates the account and signs it in.
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "user": { "id": 1, "email": "alice@example.com", "name": "Alice", ... }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing fields, malformed email, short password
/// - 409 Conflict: Email already exists
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*request)?;

    let response = state
        .sessions
        .register(&request.name, &request.email, &request.password)
        .await?;

    Ok(HttpResponse::Created().json(response))
}
