use axum::Json;
use axum::response::{IntoResponse, Response};
use tracing::info;

use bookshelf_core::{ApiResponse, AppError};

use crate::chain::RequestContext;
use crate::state::AppState;

use super::model::UpdateUserDto;
use super::service::UsersService;

pub async fn list_users(state: AppState, _ctx: RequestContext) -> Result<Response, AppError> {
    let users = UsersService::list(&state).await?;
    Ok(Json(ApiResponse::ok(users)).into_response())
}

pub async fn get_user(state: AppState, ctx: RequestContext) -> Result<Response, AppError> {
    let id = ctx.uuid_param("id")?;
    let user = UsersService::get(&state, id).await?;
    Ok(Json(ApiResponse::ok(user)).into_response())
}

pub async fn update_user(state: AppState, ctx: RequestContext) -> Result<Response, AppError> {
    let id = ctx.uuid_param("id")?;
    let dto: UpdateUserDto = ctx.json()?;

    let user = UsersService::update(&state, id, dto).await?;
    info!(user_id = %id, "user updated");
    Ok(Json(ApiResponse::ok(user)).into_response())
}

pub async fn delete_user(state: AppState, ctx: RequestContext) -> Result<Response, AppError> {
    let id = ctx.uuid_param("id")?;
    UsersService::delete(&state, id).await?;

    info!(user_id = %id, "user deleted");
    Ok(Json(ApiResponse::empty()).into_response())
}
