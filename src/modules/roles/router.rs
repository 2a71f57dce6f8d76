use bookshelf_core::rbac::{Actions, Resource};

use crate::middleware::{authorize, require_authenticated};
use crate::registry::{RegistryError, RouteDefinition, RouteRegistry};

use super::controller;

pub fn register(registry: &mut RouteRegistry) -> Result<(), RegistryError> {
    registry.register(
        RouteDefinition::get("/roles", controller::list_roles)
            .gate(require_authenticated())
            .gate(authorize(Resource::Permissions, Actions::READ)),
    )?;
    registry.register(
        RouteDefinition::get("/roles/:id", controller::get_role)
            .gate(require_authenticated())
            .gate(authorize(Resource::Permissions, Actions::READ)),
    )?;
    registry.register(
        RouteDefinition::post("/roles", controller::create_role)
            .gate(require_authenticated())
            .gate(authorize(
                Resource::Permissions,
                Actions::READ.and(Actions::CREATE),
            )),
    )?;
    registry.register(
        RouteDefinition::patch("/roles/:id", controller::update_role)
            .gate(require_authenticated())
            .gate(authorize(
                Resource::Permissions,
                Actions::READ.and(Actions::UPDATE),
            )),
    )?;
    registry.register(
        RouteDefinition::delete("/roles/:id", controller::delete_role)
            .gate(require_authenticated())
            .gate(authorize(Resource::Permissions, Actions::DELETE)),
    )?;

    Ok(())
}
