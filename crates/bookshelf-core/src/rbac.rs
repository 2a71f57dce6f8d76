//! Role-based access control model.
//!
//! Resources are a closed enumeration rather than free-form strings, so a
//! permission check against a category that does not exist is a compile
//! error, not a silent deny. The evaluator itself is a pure function over
//! data already resolved onto the [`Principal`] at authentication time —
//! it performs no I/O.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A protected resource category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resource {
    Users,
    Books,
    Permissions,
    Logs,
}

/// One role's granted actions on one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub resource: Resource,
    pub read: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl Permission {
    pub const fn full(resource: Resource) -> Self {
        Self {
            resource,
            read: true,
            create: true,
            update: true,
            delete: true,
        }
    }

    pub const fn none(resource: Resource) -> Self {
        Self {
            resource,
            read: false,
            create: false,
            update: false,
            delete: false,
        }
    }
}

/// The subset of actions a route requires. Combine with [`Actions::and`]:
/// `Actions::READ.and(Actions::UPDATE)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actions {
    pub read: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl Actions {
    pub const READ: Self = Self {
        read: true,
        create: false,
        update: false,
        delete: false,
    };
    pub const CREATE: Self = Self {
        read: false,
        create: true,
        update: false,
        delete: false,
    };
    pub const UPDATE: Self = Self {
        read: false,
        create: false,
        update: true,
        delete: false,
    };
    pub const DELETE: Self = Self {
        read: false,
        create: false,
        update: false,
        delete: true,
    };

    pub const fn and(self, other: Self) -> Self {
        Self {
            read: self.read || other.read,
            create: self.create || other.create,
            update: self.update || other.update,
            delete: self.delete || other.delete,
        }
    }
}

/// Account lifecycle state as stored on the user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Banned,
    Inactive,
}

/// A role with its permission set materialized, as attached to a principal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleGrant {
    pub id: Uuid,
    pub title: String,
    pub permissions: Vec<Permission>,
}

/// The authenticated identity for one request.
///
/// Built by the authentication gate from a verified token plus a single
/// user lookup (role permissions joined). Request-scoped; never cached or
/// shared across requests.
#[derive(Debug, Clone)]
pub struct Principal {
    pub subject: Uuid,
    pub role: Option<RoleGrant>,
    pub account_status: AccountStatus,
    pub email_confirmed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// Decide whether `principal` may perform `required` on `resource`.
///
/// Deny without a role, deny without a permission entry for the resource,
/// deny if any required bit is absent from the matched entry. When a role
/// holds duplicate entries for one resource, the first declared entry wins;
/// the role write path rejects such duplicates, so this only matters for
/// data created around it.
pub fn evaluate(principal: &Principal, resource: Resource, required: Actions) -> Access {
    let Some(role) = &principal.role else {
        return Access::Deny;
    };

    let Some(entry) = role.permissions.iter().find(|p| p.resource == resource) else {
        return Access::Deny;
    };

    if (required.read && !entry.read)
        || (required.create && !entry.create)
        || (required.update && !entry.update)
        || (required.delete && !entry.delete)
    {
        return Access::Deny;
    }

    Access::Allow
}
