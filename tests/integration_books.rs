mod common;

use axum::http::{Method, StatusCode};

use bookshelf_core::rbac::AccountStatus;
use common::{create_test_user, login, send, setup_test_app};

#[tokio::test]
async fn books_require_a_session() {
    let (app, _state) = setup_test_app().await;

    let (status, body, _) = send(&app, Method::GET, "/books", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Authentication required");
}

#[tokio::test]
async fn any_stock_role_can_read_the_catalogue() {
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

    let (status, body, _) = send(&app, Method::GET, "/books", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let books = body["data"].as_array().unwrap();
    assert!(!books.is_empty());
    assert!(books[0]["title"].is_string());
}
