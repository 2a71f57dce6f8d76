//! Session lifecycle: credential checks, signup, provider login.

use anyhow::anyhow;

use bookshelf_auth::issue_token;
use bookshelf_core::AppError;
use bookshelf_core::rbac::AccountStatus;

use crate::db::new_user;
use crate::modules::users::model::{ExternalAuth, User};
use crate::state::AppState;

use super::model::{LoginRequest, ProviderLoginRequest, SignupRequest};

/// Title of the role granted to self-registered accounts.
const DEFAULT_ROLE: &str = "User";

/// An established session: the user, their token, and its lifetime in
/// seconds (which also becomes the cookie max-age).
pub struct Session {
    pub user: User,
    pub token: String,
    pub ttl: i64,
}

pub struct AuthService;

impl AuthService {
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<Session, AppError> {
        let Some(user) = state.users.find_by_email(&dto.email).await? else {
            return Err(AppError::InvalidCredentials);
        };

        // Provider-only accounts have no password to check.
        let Some(hash) = user.password_hash.as_deref() else {
            return Err(AppError::InvalidCredentials);
        };

        let matches = bcrypt::verify(&dto.password, hash).map_err(AppError::internal)?;
        if !matches {
            return Err(AppError::InvalidCredentials);
        }

        Self::check_account_status(&user)?;
        Self::open_session(state, user, dto.remember_me)
    }

    /// Create the account and log it straight in.
    pub async fn signup(state: &AppState, dto: SignupRequest) -> Result<Session, AppError> {
        if state.users.find_by_email(&dto.email).await?.is_some() {
            return Err(AppError::BadRequest(
                "An account with this email already exists".to_string(),
            ));
        }

        let hash = bcrypt::hash(&dto.password, bcrypt::DEFAULT_COST).map_err(AppError::internal)?;
        let role_id = Self::default_role_id(state).await?;

        let user = state
            .users
            .insert(new_user(
                dto.username,
                dto.email,
                Some(hash),
                role_id,
                false,
                None,
            ))
            .await?;

        Self::open_session(state, user, dto.remember_me)
    }

    /// Login backed by an external provider token. Creates the account on
    /// first sight; the provider already confirmed the email.
    pub async fn login_with_provider(
        state: &AppState,
        dto: ProviderLoginRequest,
    ) -> Result<(Session, bool), AppError> {
        let Some(profile) = state.providers.verify(dto.provider, &dto.access_token).await? else {
            return Err(AppError::InvalidCredentials);
        };

        let existing = state
            .users
            .find_by_provider(dto.provider, &profile.subject)
            .await?;

        let (user, created) = match existing {
            Some(user) => (user, false),
            None => {
                if state.users.find_by_email(&profile.email).await?.is_some() {
                    return Err(AppError::BadRequest(
                        "An account with this email already exists".to_string(),
                    ));
                }

                let role_id = Self::default_role_id(state).await?;
                let user = state
                    .users
                    .insert(new_user(
                        profile.username,
                        profile.email,
                        None,
                        role_id,
                        true,
                        Some(ExternalAuth {
                            provider: dto.provider,
                            subject: profile.subject,
                        }),
                    ))
                    .await?;
                (user, true)
            }
        };

        Self::check_account_status(&user)?;
        let session = Self::open_session(state, user, dto.remember_me)?;
        Ok((session, created))
    }

    fn check_account_status(user: &User) -> Result<(), AppError> {
        match user.account_status {
            AccountStatus::Banned => Err(AppError::Banned),
            AccountStatus::Inactive => Err(AppError::InactiveAccount),
            AccountStatus::Active => Ok(()),
        }
    }

    fn open_session(state: &AppState, user: User, remember_me: bool) -> Result<Session, AppError> {
        let ttl = if remember_me {
            state.token_config.remember_me_ttl
        } else {
            state.token_config.session_ttl
        };

        let token = issue_token(user.id, ttl, &state.token_config)
            .map_err(|_| AppError::internal(anyhow!("failed to sign session token")))?;

        Ok(Session { user, token, ttl })
    }

    async fn default_role_id(state: &AppState) -> Result<Option<uuid::Uuid>, AppError> {
        Ok(state
            .roles
            .find_by_title(DEFAULT_ROLE)
            .await?
            .map(|role| role.id))
    }
}
