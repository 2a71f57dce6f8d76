use axum::Json;
use axum::response::{IntoResponse, Response};

use bookshelf_core::{ApiResponse, AppError};

use crate::chain::RequestContext;
use crate::state::AppState;

pub async fn list_books(state: AppState, _ctx: RequestContext) -> Result<Response, AppError> {
    let books = state.books.list().await?;
    Ok(Json(ApiResponse::ok(books)).into_response())
}
