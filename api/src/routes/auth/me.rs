use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/auth/me
pub async fn me(state: web::Data<AppState>, auth: AuthContext) -> Result<HttpResponse, ApiError> {
    let user = state.sessions.current_user(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}
