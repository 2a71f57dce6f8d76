//! Authentication request and response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use bookshelf_core::rbac::AccountStatus;

use crate::db::Provider;
use crate::modules::users::model::User;

#[derive(Deserialize, Debug, Clone, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    /// Extends the session from one day to one year.
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Deserialize, Debug, Clone, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, message = "username must be at least 3 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    /// Extends the session from one day to one year.
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Deserialize, Debug, Clone, Validate)]
pub struct ProviderLoginRequest {
    pub provider: Provider,
    #[validate(length(min = 1, message = "access_token is required"))]
    pub access_token: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// The user view returned from login and signup.
#[derive(Serialize, Debug, Clone)]
pub struct SessionUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role_id: Option<Uuid>,
    pub account_status: AccountStatus,
    pub email_confirmed: bool,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role_id: user.role_id,
            account_status: user.account_status,
            email_confirmed: user.email_confirmed,
        }
    }
}
