use uuid::Uuid;

use bookshelf_core::{AppError, messages};

use crate::db::UserChanges;
use crate::state::AppState;

use super::model::{UpdateUserDto, User};

pub struct UsersService;

impl UsersService {
    pub async fn list(state: &AppState) -> Result<Vec<User>, AppError> {
        Ok(state.users.list().await?)
    }

    pub async fn get(state: &AppState, id: Uuid) -> Result<User, AppError> {
        state
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND.to_string()))
    }

    pub async fn update(state: &AppState, id: Uuid, dto: UpdateUserDto) -> Result<User, AppError> {
        if dto.username.is_none() && dto.email.is_none() {
            return Err(AppError::BadRequest("Nothing to update".to_string()));
        }

        // Email uniqueness is checked against everyone but the target.
        if let Some(email) = dto.email.as_deref()
            && let Some(holder) = state.users.find_by_email(email).await?
            && holder.id != id
        {
            return Err(AppError::BadRequest(
                "An account with this email already exists".to_string(),
            ));
        }

        state
            .users
            .update(
                id,
                UserChanges {
                    username: dto.username,
                    email: dto.email,
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND.to_string()))
    }

    pub async fn delete(state: &AppState, id: Uuid) -> Result<(), AppError> {
        if !state.users.delete(id).await? {
            return Err(AppError::NotFound(messages::NOT_FOUND.to_string()));
        }
        Ok(())
    }
}
