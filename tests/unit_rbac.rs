use uuid::Uuid;

use bookshelf_core::rbac::{
    Access, AccountStatus, Actions, Permission, Principal, Resource, RoleGrant, evaluate,
};

fn principal(permissions: Vec<Permission>) -> Principal {
    Principal {
        subject: Uuid::new_v4(),
        role: Some(RoleGrant {
            id: Uuid::new_v4(),
            title: "Test".to_string(),
            permissions,
        }),
        account_status: AccountStatus::Active,
        email_confirmed: true,
    }
}

/// The stock "User" role's permission shape.
fn stock_user_permissions() -> Vec<Permission> {
    vec![
        Permission {
            resource: Resource::Users,
            read: true,
            create: false,
            update: true,
            delete: false,
        },
        Permission {
            resource: Resource::Books,
            read: true,
            create: false,
            update: false,
            delete: false,
        },
        Permission::none(Resource::Permissions),
        Permission {
            resource: Resource::Logs,
            read: true,
            create: true,
            update: false,
            delete: false,
        },
    ]
}

#[test]
fn roleless_principal_is_denied() {
    let principal = Principal {
        subject: Uuid::new_v4(),
        role: None,
        account_status: AccountStatus::Active,
        email_confirmed: true,
    };

    assert_eq!(
        evaluate(&principal, Resource::Books, Actions::READ),
        Access::Deny
    );
}

#[test]
fn resource_without_an_entry_is_denied() {
    let principal = principal(vec![Permission::full(Resource::Books)]);
    assert_eq!(
        evaluate(&principal, Resource::Logs, Actions::READ),
        Access::Deny
    );
}

#[test]
fn explicit_none_entry_is_denied() {
    let principal = principal(stock_user_permissions());
    assert_eq!(
        evaluate(&principal, Resource::Permissions, Actions::READ),
        Access::Deny
    );
}

#[test]
fn every_required_bit_must_be_granted() {
    let principal = principal(stock_user_permissions());

    assert_eq!(
        evaluate(
            &principal,
            Resource::Users,
            Actions::READ.and(Actions::UPDATE)
        ),
        Access::Allow
    );
    assert_eq!(
        evaluate(
            &principal,
            Resource::Users,
            Actions::READ.and(Actions::DELETE)
        ),
        Access::Deny
    );
}

#[test]
fn duplicate_entries_resolve_to_the_first_declared() {
    let principal = principal(vec![
        Permission::none(Resource::Books),
        Permission::full(Resource::Books),
    ]);

    assert_eq!(
        evaluate(&principal, Resource::Books, Actions::READ),
        Access::Deny
    );
}

#[test]
fn account_state_does_not_influence_permission_evaluation() {
    let mut banned = principal(stock_user_permissions());
    banned.account_status = AccountStatus::Banned;

    // Status gates live in the chain; the evaluator only reads the role.
    assert_eq!(
        evaluate(&banned, Resource::Books, Actions::READ),
        Access::Allow
    );
}
