//! Group route handlers. Every route requires a bearer token and only ever
//! touches the caller's own groups.

use actix_web::{web, HttpResponse};

use ato_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::{
    validate_request, CreateGroupRequest, UpdateGroupNameRequest, UpdateGroupPositionRequest,
};
use crate::handlers::ApiError;
use crate::middleware::{AuthContext, JwtAuth};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/groups")
            .app_data(
                web::PathConfig::default()
                    .error_handler(|_, _| ApiError::bad_request("Invalid group ID").into()),
            )
            .wrap(JwtAuth)
            .route("", web::post().to(create_group))
            .route("", web::get().to(list_groups))
            .route("/{id}", web::put().to(update_group_name))
            .route("/{id}", web::delete().to(delete_group))
            .route("/{id}/position", web::put().to(update_group_position)),
    );
}

/// POST /api/v1/groups - 201 with the new group, appended after the last one
pub async fn create_group(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<CreateGroupRequest>,
) -> Result<HttpResponse, ApiError> {
    let group = state.groups.create_group(auth.user_id, &request.name).await?;
    Ok(HttpResponse::Created().json(group))
}

/// GET /api/v1/groups - the caller's groups ordered by position
pub async fn list_groups(
    state: web::Data<AppState>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let groups = state.groups.get_user_groups(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(groups))
}

/// PUT /api/v1/groups/{id} - rename, answering with the updated group
pub async fn update_group_name(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<UpdateGroupNameRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*request)?;
    let group_id = path.into_inner();

    state
        .groups
        .update_group_name(group_id, auth.user_id, &request.name)
        .await?;

    state
        .groups
        .get_user_groups(auth.user_id)
        .await?
        .into_iter()
        .find(|group| group.id == group_id)
        .map(|group| HttpResponse::Ok().json(group))
        .ok_or_else(|| ApiError::not_found("Group not found"))
}

/// PUT /api/v1/groups/{id}/position
pub async fn update_group_position(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<UpdateGroupPositionRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_request(&*request)?;

    state
        .groups
        .update_group_position(path.into_inner(), auth.user_id, request.position)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Position updated")))
}

/// DELETE /api/v1/groups/{id}
pub async fn delete_group(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    state
        .groups
        .delete_group(path.into_inner(), auth.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Group deleted")))
}
