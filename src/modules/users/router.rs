use bookshelf_core::rbac::{Actions, Resource};

use crate::middleware::{
    authorize, require_active, require_authenticated, require_email_confirmed, require_not_banned,
};
use crate::registry::{RegistryError, RouteDefinition, RouteRegistry};

use super::controller;

pub fn register(registry: &mut RouteRegistry) -> Result<(), RegistryError> {
    registry.register(
        RouteDefinition::get("/users", controller::list_users)
            .gate(require_authenticated())
            .gate(authorize(Resource::Users, Actions::READ)),
    )?;
    registry.register(
        RouteDefinition::get("/users/:id", controller::get_user)
            .gate(require_authenticated())
            .gate(authorize(Resource::Users, Actions::READ)),
    )?;
    registry.register(
        RouteDefinition::patch("/users/:id", controller::update_user)
            .gate(require_authenticated())
            .gate(require_email_confirmed())
            .gate(authorize(Resource::Users, Actions::READ.and(Actions::UPDATE))),
    )?;
    registry.register(
        RouteDefinition::delete("/users/:id", controller::delete_user)
            .gate(require_authenticated())
            .gate(require_active())
            .gate(require_not_banned())
            .gate(authorize(Resource::Users, Actions::DELETE)),
    )?;

    Ok(())
}
