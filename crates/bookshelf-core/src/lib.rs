//! # Bookshelf Core
//!
//! Core types shared across the Bookshelf API:
//!
//! - [`errors`]: the application error taxonomy with HTTP response conversion
//! - [`messages`]: canonical user-facing error message constants
//! - [`response`]: the `{success, data, message}` response envelope
//! - [`rbac`]: resources, permissions, principals, and the pure permission
//!   evaluator

pub mod errors;
pub mod messages;
pub mod rbac;
pub mod response;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use rbac::{Access, AccountStatus, Actions, Permission, Principal, Resource, RoleGrant};
pub use response::ApiResponse;
