mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use bookshelf_core::rbac::AccountStatus;
use common::{create_test_user, login, send, setup_test_app};

#[tokio::test]
async fn roles_require_a_session() {
    let (app, _state) = setup_test_app().await;

    let (status, body, _) = send(&app, Method::GET, "/roles", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Authentication required");
}

#[tokio::test]
async fn stock_user_role_cannot_see_roles() {
    let (app, state) = setup_test_app().await;
    create_test_user(
        &state,
        "reader@example.com",
        "correct-password",
        Some("User"),
        AccountStatus::Active,
        true,
    )
    .await;
    let cookie = login(&app, "reader@example.com", "correct-password").await;

    let (status, body, _) = send(&app, Method::GET, "/roles", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authorization failed");
}

#[tokio::test]
async fn admin_can_list_the_seeded_roles() {
    let (app, state) = setup_test_app().await;
    create_test_user(
        &state,
        "admin@example.com",
        "correct-password",
        Some("Admin"),
        AccountStatus::Active,
        true,
    )
    .await;
    let cookie = login(&app, "admin@example.com", "correct-password").await;

    let (status, body, _) = send(&app, Method::GET, "/roles", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|role| role["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["User", "Moderator", "Admin", "SuperAdmin"]);
}

#[tokio::test]
async fn admin_can_create_roles() {
    let (app, state) = setup_test_app().await;
    create_test_user(
        &state,
        "admin@example.com",
        "correct-password",
        Some("Admin"),
        AccountStatus::Active,
        true,
    )
    .await;
    let cookie = login(&app, "admin@example.com", "correct-password").await;

    let (status, body, _) = send(
        &app,
        Method::POST,
        "/roles",
        Some(&cookie),
        Some(json!({
            "title": "Librarian",
            "permissions": [
                { "resource": "Books", "read": true, "create": true, "update": true, "delete": false }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["title"], "Librarian");
    assert!(state.roles.find_by_title("Librarian").await.unwrap().is_some());
}

#[tokio::test]
async fn role_writes_reject_duplicate_resources() {
    let (app, state) = setup_test_app().await;
    create_test_user(
        &state,
        "admin@example.com",
        "correct-password",
        Some("Admin"),
        AccountStatus::Active,
        true,
    )
    .await;
    let cookie = login(&app, "admin@example.com", "correct-password").await;

    let (status, body, _) = send(
        &app,
        Method::POST,
        "/roles",
        Some(&cookie),
        Some(json!({
            "title": "Broken",
            "permissions": [
                { "resource": "Books", "read": true, "create": false, "update": false, "delete": false },
                { "resource": "Books", "read": false, "create": false, "update": false, "delete": true }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["message"],
        "permissions must name each resource at most once"
    );
    assert!(state.roles.find_by_title("Broken").await.unwrap().is_none());
}

#[tokio::test]
async fn role_titles_are_unique() {
    let (app, state) = setup_test_app().await;
    create_test_user(
        &state,
        "admin@example.com",
        "correct-password",
        Some("Admin"),
        AccountStatus::Active,
        true,
    )
    .await;
    let cookie = login(&app, "admin@example.com", "correct-password").await;

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/roles",
        Some(&cookie),
        Some(json!({ "title": "Moderator", "permissions": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_cannot_update_or_delete_roles() {
    let (app, state) = setup_test_app().await;
    create_test_user(
        &state,
        "admin@example.com",
        "correct-password",
        Some("Admin"),
        AccountStatus::Active,
        true,
    )
    .await;
    let cookie = login(&app, "admin@example.com", "correct-password").await;
    let role = state.roles.find_by_title("User").await.unwrap().unwrap();

    // The stock Admin grant on Permissions is read+create only.
    let (status, _, _) = send(
        &app,
        Method::PATCH,
        &format!("/roles/{}", role.id),
        Some(&cookie),
        Some(json!({ "title": "Member" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(
        &app,
        Method::DELETE,
        &format!("/roles/{}", role.id),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn superadmin_can_update_roles() {
    let (app, state) = setup_test_app().await;
    create_test_user(
        &state,
        "root@example.com",
        "correct-password",
        Some("SuperAdmin"),
        AccountStatus::Active,
        true,
    )
    .await;
    let cookie = login(&app, "root@example.com", "correct-password").await;
    let role = state.roles.find_by_title("User").await.unwrap().unwrap();

    let (status, body, _) = send(
        &app,
        Method::PATCH,
        &format!("/roles/{}", role.id),
        Some(&cookie),
        Some(json!({ "title": "Member" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Member");
}

#[tokio::test]
async fn deleting_a_role_detaches_its_users() {
    let (app, state) = setup_test_app().await;
    create_test_user(
        &state,
        "root@example.com",
        "correct-password",
        Some("SuperAdmin"),
        AccountStatus::Active,
        true,
    )
    .await;
    let member = create_test_user(
        &state,
        "member@example.com",
        "correct-password",
        Some("User"),
        AccountStatus::Active,
        true,
    )
    .await;
    let cookie = login(&app, "root@example.com", "correct-password").await;
    let role = state.roles.find_by_title("User").await.unwrap().unwrap();

    let (status, body, _) = send(
        &app,
        Method::DELETE,
        &format!("/roles/{}", role.id),
        Some(&cookie),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(state.roles.find_by_id(role.id).await.unwrap().is_none());

    let stored = state.users.find_by_id(member.id).await.unwrap().unwrap();
    assert_eq!(stored.role_id, None);

    // The detached member's next permission check denies.
    let member_cookie = login(&app, "member@example.com", "correct-password").await;
    let (status, _, _) = send(&app, Method::GET, "/books", Some(&member_cookie), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
