//! User data models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use bookshelf_core::rbac::AccountStatus;

use crate::db::Provider;

/// A user account.
///
/// The password hash and any external provider linkage never leave the
/// process in responses.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub role_id: Option<Uuid>,
    pub account_status: AccountStatus,
    pub email_confirmed: bool,
    #[serde(skip_serializing)]
    pub external_auth: Option<ExternalAuth>,
    pub created_at: DateTime<Utc>,
}

/// Link between a user and the external identity provider that vouched
/// for them at signup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExternalAuth {
    pub provider: Provider,
    pub subject: String,
}

/// DTO for updating a user's profile. Absent fields are left untouched.
#[derive(Deserialize, Debug, Clone, Validate)]
pub struct UpdateUserDto {
    #[validate(length(min = 3, message = "username must be at least 3 characters"))]
    pub username: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
}
