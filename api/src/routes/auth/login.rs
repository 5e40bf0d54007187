use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::{validate_request, LoginRequest};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/login
///
/// Unknown email and wrong password both answer 401 "Invalid credentials".
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*request)?;

    let response = state
        .sessions
        .login(&request.email, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
