//! The application route table.
//!
//! Every route is registered here (directly or through a module's
//! `register`) during startup, then the registry is frozen into the
//! dispatchable router. A registration conflict is a fatal startup
//! error.

use axum::Json;
use axum::response::{IntoResponse, Response};

use bookshelf_core::{ApiResponse, AppError};

use crate::chain::RequestContext;
use crate::middleware::pass_user_if_present;
use crate::modules::{auth, books, roles, users};
use crate::registry::{AppRouter, RegistryError, RouteDefinition, RouteRegistry};
use crate::state::AppState;

pub fn init_router() -> Result<AppRouter, RegistryError> {
    let mut registry = RouteRegistry::new();

    registry.register(RouteDefinition::get("/", root).gate(pass_user_if_present()))?;

    auth::router::register(&mut registry)?;
    users::router::register(&mut registry)?;
    roles::router::register(&mut registry)?;
    books::router::register(&mut registry)?;

    registry.build()
}

/// Landing route. Open to everyone; reports whether the caller holds a
/// live session.
async fn root(_state: AppState, ctx: RequestContext) -> Result<Response, AppError> {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "session_active": ctx.principal().is_some(),
    });

    Ok(Json(ApiResponse::ok(body)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_table_builds() {
        init_router().unwrap();
    }
}
