use bookshelf_core::rbac::{Actions, Resource};

use crate::middleware::{authorize, require_authenticated};
use crate::registry::{RegistryError, RouteDefinition, RouteRegistry};

use super::controller;

pub fn register(registry: &mut RouteRegistry) -> Result<(), RegistryError> {
    registry.register(
        RouteDefinition::get("/books", controller::list_books)
            .gate(require_authenticated())
            .gate(authorize(Resource::Books, Actions::READ)),
    )?;

    Ok(())
}
