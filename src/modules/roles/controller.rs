use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::info;

use bookshelf_core::{ApiResponse, AppError};

use crate::chain::RequestContext;
use crate::state::AppState;

use super::model::{CreateRoleDto, UpdateRoleDto};
use super::service::RolesService;

pub async fn list_roles(state: AppState, _ctx: RequestContext) -> Result<Response, AppError> {
    let roles = RolesService::list(&state).await?;
    Ok(Json(ApiResponse::ok(roles)).into_response())
}

pub async fn get_role(state: AppState, ctx: RequestContext) -> Result<Response, AppError> {
    let id = ctx.uuid_param("id")?;
    let role = RolesService::get(&state, id).await?;
    Ok(Json(ApiResponse::ok(role)).into_response())
}

pub async fn create_role(state: AppState, ctx: RequestContext) -> Result<Response, AppError> {
    let dto: CreateRoleDto = ctx.json()?;
    let role = RolesService::create(&state, dto).await?;

    info!(role_id = %role.id, title = %role.title, "role created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(role))).into_response())
}

pub async fn update_role(state: AppState, ctx: RequestContext) -> Result<Response, AppError> {
    let id = ctx.uuid_param("id")?;
    let dto: UpdateRoleDto = ctx.json()?;

    let role = RolesService::update(&state, id, dto).await?;
    info!(role_id = %id, "role updated");
    Ok(Json(ApiResponse::ok(role)).into_response())
}

pub async fn delete_role(state: AppState, ctx: RequestContext) -> Result<Response, AppError> {
    let id = ctx.uuid_param("id")?;
    RolesService::delete(&state, id).await?;

    info!(role_id = %id, "role deleted");
    Ok(Json(ApiResponse::empty()).into_response())
}
