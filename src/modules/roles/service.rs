use uuid::Uuid;

use bookshelf_core::rbac::Permission;
use bookshelf_core::{AppError, messages};

use crate::db::RoleChanges;
use crate::state::AppState;

use super::model::{CreateRoleDto, Role, UpdateRoleDto};

pub struct RolesService;

impl RolesService {
    pub async fn list(state: &AppState) -> Result<Vec<Role>, AppError> {
        Ok(state.roles.list().await?)
    }

    pub async fn get(state: &AppState, id: Uuid) -> Result<Role, AppError> {
        state
            .roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND.to_string()))
    }

    pub async fn create(state: &AppState, dto: CreateRoleDto) -> Result<Role, AppError> {
        reject_duplicate_resources(&dto.permissions)?;

        if state.roles.find_by_title(&dto.title).await?.is_some() {
            return Err(AppError::BadRequest(
                "A role with this title already exists".to_string(),
            ));
        }

        Ok(state
            .roles
            .insert(Role {
                id: Uuid::new_v4(),
                title: dto.title,
                permissions: dto.permissions,
            })
            .await?)
    }

    pub async fn update(state: &AppState, id: Uuid, dto: UpdateRoleDto) -> Result<Role, AppError> {
        if dto.title.is_none() && dto.permissions.is_none() {
            return Err(AppError::BadRequest("Nothing to update".to_string()));
        }

        if let Some(permissions) = dto.permissions.as_deref() {
            reject_duplicate_resources(permissions)?;
        }

        if let Some(title) = dto.title.as_deref()
            && let Some(holder) = state.roles.find_by_title(title).await?
            && holder.id != id
        {
            return Err(AppError::BadRequest(
                "A role with this title already exists".to_string(),
            ));
        }

        state
            .roles
            .update(
                id,
                RoleChanges {
                    title: dto.title,
                    permissions: dto.permissions,
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND.to_string()))
    }

    /// Delete a role and detach it from every user holding it. Those
    /// users keep their accounts but lose all granted permissions.
    pub async fn delete(state: &AppState, id: Uuid) -> Result<(), AppError> {
        if !state.roles.delete(id).await? {
            return Err(AppError::NotFound(messages::NOT_FOUND.to_string()));
        }

        state.users.detach_role(id).await?;
        Ok(())
    }
}

/// A permission set may name each resource at most once.
fn reject_duplicate_resources(permissions: &[Permission]) -> Result<(), AppError> {
    for (i, permission) in permissions.iter().enumerate() {
        if permissions[..i]
            .iter()
            .any(|earlier| earlier.resource == permission.resource)
        {
            return Err(AppError::Validation(
                "permissions must name each resource at most once".to_string(),
            ));
        }
    }
    Ok(())
}
