use std::sync::Arc;

use axum_extra::extract::cookie::Key;

use bookshelf_config::{CookieConfig, CorsConfig, TokenConfig};

use crate::db::{BookStore, MemoryDb, NoProviders, ProviderVerifier, RoleStore, UserStore};

/// Process-wide application state.
///
/// Everything here is either read-only configuration or a handle to a
/// store collaborator; nothing request-scoped lives in the state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub roles: Arc<dyn RoleStore>,
    pub books: Arc<dyn BookStore>,
    pub providers: Arc<dyn ProviderVerifier>,
    pub token_config: TokenConfig,
    pub cookie_config: CookieConfig,
    pub cors_config: CorsConfig,
    cookie_key: Key,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        roles: Arc<dyn RoleStore>,
        books: Arc<dyn BookStore>,
        providers: Arc<dyn ProviderVerifier>,
        token_config: TokenConfig,
        cookie_config: CookieConfig,
        cors_config: CorsConfig,
    ) -> Self {
        let cookie_key = Key::from(&cookie_config.key_material());
        Self {
            users,
            roles,
            books,
            providers,
            token_config,
            cookie_config,
            cors_config,
            cookie_key,
        }
    }

    /// The cookie signing key, built once from the stretched cookie secret.
    pub fn cookie_key(&self) -> Key {
        self.cookie_key.clone()
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db = Arc::new(MemoryDb::new());
    db.seed_default_roles().await?;
    db.seed_books().await?;

    Ok(AppState::new(
        db.clone(),
        db.clone(),
        db,
        Arc::new(NoProviders),
        TokenConfig::from_env(),
        CookieConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
