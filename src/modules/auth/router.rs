use crate::middleware::{require_authenticated, require_guest};
use crate::registry::{RegistryError, RouteDefinition, RouteRegistry};

use super::controller;

pub fn register(registry: &mut RouteRegistry) -> Result<(), RegistryError> {
    registry.register(
        RouteDefinition::post("/auth/login", controller::login).gate(require_guest()),
    )?;
    registry.register(
        RouteDefinition::post("/auth/signup", controller::signup).gate(require_guest()),
    )?;
    registry.register(
        RouteDefinition::post("/auth/with-provider", controller::login_with_provider)
            .gate(require_guest()),
    )?;
    registry.register(
        RouteDefinition::post("/auth/logout", controller::logout).gate(require_authenticated()),
    )?;

    Ok(())
}
