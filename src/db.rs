//! Storage collaborators and the in-memory database.
//!
//! Handlers and gates talk to stores through trait objects so the
//! storage engine can be swapped without touching route code. The
//! bundled [`MemoryDb`] backs every store behind a single `RwLock`;
//! reads share the lock, writes take it exclusively.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use bookshelf_core::rbac::{AccountStatus, Permission, Principal, Resource, RoleGrant};

use crate::modules::books::model::Book;
use crate::modules::roles::model::Role;
use crate::modules::users::model::{ExternalAuth, User};

/// External identity providers users can sign in with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Facebook,
}

/// Identity attested by an external provider for a verified access token.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    pub subject: String,
    pub email: String,
    pub username: String,
}

/// Verifies provider access tokens against the provider's own API.
#[async_trait]
pub trait ProviderVerifier: Send + Sync {
    /// `Ok(None)` means the provider rejected the token.
    async fn verify(&self, provider: Provider, access_token: &str)
    -> Result<Option<ProviderProfile>>;
}

/// Verifier for deployments with no provider credentials configured:
/// every token is rejected.
pub struct NoProviders;

#[async_trait]
impl ProviderVerifier for NoProviders {
    async fn verify(&self, _provider: Provider, _access_token: &str) -> Result<Option<ProviderProfile>> {
        Ok(None)
    }
}

/// Field-wise user update; `None` leaves the stored value untouched.
#[derive(Debug, Default, Clone)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Field-wise role update; `None` leaves the stored value untouched.
#[derive(Debug, Default, Clone)]
pub struct RoleChanges {
    pub title: Option<String>,
    pub permissions: Option<Vec<Permission>>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Resolve a verified token subject into a [`Principal`] with the
    /// role's permissions joined in. `Ok(None)` when no such user exists.
    async fn find_principal_by_subject(&self, subject: Uuid) -> Result<Option<Principal>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_provider(&self, provider: Provider, subject: &str) -> Result<Option<User>>;
    async fn list(&self) -> Result<Vec<User>>;
    async fn insert(&self, user: User) -> Result<User>;
    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>>;
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Clear `role_id` on every user holding the given role.
    async fn detach_role(&self, role_id: Uuid) -> Result<u64>;
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Role>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>>;
    async fn find_by_title(&self, title: &str) -> Result<Option<Role>>;
    async fn insert(&self, role: Role) -> Result<Role>;
    async fn update(&self, id: Uuid, changes: RoleChanges) -> Result<Option<Role>>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Book>>;
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    roles: Vec<Role>,
    books: Vec<Book>,
}

/// In-memory storage engine backing all stores.
#[derive(Default)]
pub struct MemoryDb {
    inner: RwLock<Inner>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the four stock roles if no roles exist yet.
    pub async fn seed_default_roles(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        if !inner.roles.is_empty() {
            return Ok(());
        }

        let read_update_users = Permission {
            resource: Resource::Users,
            read: true,
            create: false,
            update: true,
            delete: false,
        };
        let read_books = Permission {
            resource: Resource::Books,
            read: true,
            create: false,
            update: false,
            delete: false,
        };
        let append_logs = Permission {
            resource: Resource::Logs,
            read: true,
            create: true,
            update: false,
            delete: false,
        };
        let manage_permissions = Permission {
            resource: Resource::Permissions,
            read: true,
            create: true,
            update: false,
            delete: false,
        };

        let stock: [(&str, Vec<Permission>); 4] = [
            (
                "User",
                vec![
                    read_update_users,
                    read_books,
                    Permission::none(Resource::Permissions),
                    append_logs,
                ],
            ),
            (
                "Moderator",
                vec![
                    Permission::full(Resource::Users),
                    Permission::full(Resource::Books),
                    Permission::none(Resource::Permissions),
                    append_logs,
                ],
            ),
            (
                "Admin",
                vec![
                    Permission::full(Resource::Users),
                    Permission::full(Resource::Books),
                    manage_permissions,
                    append_logs,
                ],
            ),
            (
                "SuperAdmin",
                vec![
                    Permission::full(Resource::Users),
                    Permission::full(Resource::Books),
                    Permission::full(Resource::Permissions),
                    Permission::full(Resource::Logs),
                ],
            ),
        ];

        for (title, permissions) in stock {
            inner.roles.push(Role {
                id: Uuid::new_v4(),
                title: title.to_string(),
                permissions,
            });
        }

        Ok(())
    }

    /// Seed a small starter catalogue if no books exist yet.
    pub async fn seed_books(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        if !inner.books.is_empty() {
            return Ok(());
        }

        let stock = [
            ("The Pragmatic Programmer", "Andrew Hunt", 1999),
            ("Designing Data-Intensive Applications", "Martin Kleppmann", 2017),
            ("The Mythical Man-Month", "Frederick Brooks", 1975),
        ];

        for (title, author, year) in stock {
            inner.books.push(Book {
                id: Uuid::new_v4(),
                title: title.to_string(),
                author: author.to_string(),
                year,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryDb {
    async fn find_principal_by_subject(&self, subject: Uuid) -> Result<Option<Principal>> {
        let inner = self.inner.read().await;
        let Some(user) = inner.users.get(&subject) else {
            return Ok(None);
        };

        let role = user.role_id.and_then(|role_id| {
            inner
                .roles
                .iter()
                .find(|role| role.id == role_id)
                .map(|role| RoleGrant {
                    id: role.id,
                    title: role.title.clone(),
                    permissions: role.permissions.clone(),
                })
        });

        Ok(Some(Principal {
            subject: user.id,
            role,
            account_status: user.account_status,
            email_confirmed: user.email_confirmed,
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_provider(&self, provider: Provider, subject: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|user| {
                user.external_auth
                    .as_ref()
                    .is_some_and(|ext| ext.provider == provider && ext.subject == subject)
            })
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>> {
        let inner = self.inner.read().await;
        let mut users: Vec<User> = inner.users.values().cloned().collect();
        users.sort_by_key(|user| user.created_at);
        Ok(users)
    }

    async fn insert(&self, user: User) -> Result<User> {
        let mut inner = self.inner.write().await;
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>> {
        let mut inner = self.inner.write().await;
        let Some(user) = inner.users.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(username) = changes.username {
            user.username = username;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.inner.write().await.users.remove(&id).is_some())
    }

    async fn detach_role(&self, role_id: Uuid) -> Result<u64> {
        let mut inner = self.inner.write().await;
        let mut detached = 0;
        for user in inner.users.values_mut() {
            if user.role_id == Some(role_id) {
                user.role_id = None;
                detached += 1;
            }
        }
        Ok(detached)
    }
}

#[async_trait]
impl RoleStore for MemoryDb {
    async fn list(&self) -> Result<Vec<Role>> {
        Ok(self.inner.read().await.roles.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>> {
        let inner = self.inner.read().await;
        Ok(inner.roles.iter().find(|role| role.id == id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Role>> {
        let inner = self.inner.read().await;
        Ok(inner
            .roles
            .iter()
            .find(|role| role.title.eq_ignore_ascii_case(title))
            .cloned())
    }

    async fn insert(&self, role: Role) -> Result<Role> {
        let mut inner = self.inner.write().await;
        inner.roles.push(role.clone());
        Ok(role)
    }

    async fn update(&self, id: Uuid, changes: RoleChanges) -> Result<Option<Role>> {
        let mut inner = self.inner.write().await;
        let Some(role) = inner.roles.iter_mut().find(|role| role.id == id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            role.title = title;
        }
        if let Some(permissions) = changes.permissions {
            role.permissions = permissions;
        }

        Ok(Some(role.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.roles.len();
        inner.roles.retain(|role| role.id != id);
        Ok(inner.roles.len() < before)
    }
}

#[async_trait]
impl BookStore for MemoryDb {
    async fn list(&self) -> Result<Vec<Book>> {
        Ok(self.inner.read().await.books.clone())
    }
}

/// Build a user record for insertion; shared by the signup paths.
pub fn new_user(
    username: String,
    email: String,
    password_hash: Option<String>,
    role_id: Option<Uuid>,
    email_confirmed: bool,
    external_auth: Option<ExternalAuth>,
) -> User {
    User {
        id: Uuid::new_v4(),
        username,
        email,
        password_hash,
        role_id,
        account_status: AccountStatus::Active,
        email_confirmed,
        external_auth,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
pub(crate) async fn test_state() -> crate::state::AppState {
    use std::sync::Arc;

    use bookshelf_config::{CookieConfig, CorsConfig, TokenConfig};

    let db = Arc::new(MemoryDb::new());
    db.seed_default_roles().await.unwrap();
    db.seed_books().await.unwrap();

    crate::state::AppState::new(
        db.clone(),
        db.clone(),
        db,
        Arc::new(NoProviders),
        TokenConfig {
            secret: "test-token-secret".to_string(),
            session_ttl: 86_400,
            remember_me_ttl: 31_536_000,
        },
        CookieConfig {
            secret: "test-cookie-secret".to_string(),
            secure: false,
        },
        CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    )
}
