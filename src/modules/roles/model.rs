//! Role data models and DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use bookshelf_core::rbac::Permission;

/// A named bundle of per-resource permissions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: Uuid,
    pub title: String,
    pub permissions: Vec<Permission>,
}

#[derive(Deserialize, Debug, Clone, Validate)]
pub struct CreateRoleDto {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// Absent fields are left untouched.
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct UpdateRoleDto {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: Option<String>,
    pub permissions: Option<Vec<Permission>>,
}
