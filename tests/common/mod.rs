#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use bookshelf::db::MemoryDb;
use bookshelf::modules::users::model::User;
use bookshelf::router::init_router;
use bookshelf::state::AppState;
use bookshelf_config::{CookieConfig, CorsConfig, TokenConfig};
use bookshelf_core::rbac::AccountStatus;

/// Low cost keeps the hashing negligible in tests.
const TEST_BCRYPT_COST: u32 = 4;

pub const TEST_TOKEN_SECRET: &str = "test-token-secret";

/// Seeded state plus the router built over it.
pub async fn setup_test_app() -> (axum::Router, AppState) {
    let db = Arc::new(MemoryDb::new());
    db.seed_default_roles().await.unwrap();
    db.seed_books().await.unwrap();

    let state = AppState::new(
        db.clone(),
        db.clone(),
        db,
        Arc::new(bookshelf::db::NoProviders),
        TokenConfig {
            secret: TEST_TOKEN_SECRET.to_string(),
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
    );

    let app = init_router().unwrap().into_service(state.clone());
    (app, state)
}

/// Insert a user directly into the store, bypassing signup, so tests can
/// control role, account status, and confirmation freely.
pub async fn create_test_user(
    state: &AppState,
    email: &str,
    password: &str,
    role_title: Option<&str>,
    account_status: AccountStatus,
    email_confirmed: bool,
) -> User {
    let role_id = match role_title {
        Some(title) => Some(
            state
                .roles
                .find_by_title(title)
                .await
                .unwrap()
                .unwrap_or_else(|| panic!("no seeded role titled {title}"))
                .id,
        ),
        None => None,
    };

    let hash = bcrypt::hash(password, TEST_BCRYPT_COST).unwrap();

    state
        .users
        .insert(User {
            id: Uuid::new_v4(),
            username: email.split('@').next().unwrap().to_string(),
            email: email.to_string(),
            password_hash: Some(hash),
            role_id,
            account_status,
            email_confirmed,
            external_auth: None,
            created_at: Utc::now(),
        })
        .await
        .unwrap()
}

/// Send a request with an optional session cookie and JSON body; return
/// status, parsed body, and any `Set-Cookie` header value.
pub async fn send(
    app: &axum::Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value, Option<String>) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).to_string());

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            panic!(
                "non-JSON response. Status: {}, Body: {:?}",
                status,
                String::from_utf8_lossy(&bytes)
            )
        })
    };

    (status, body, set_cookie)
}

/// Sign an arbitrary token into a session cookie the server will trust
/// at the jar layer, so tests can exercise what happens after cookie
/// verification succeeds.
pub fn signed_session_cookie(state: &AppState, token: &str) -> String {
    use axum::response::IntoResponse;
    use axum_extra::extract::cookie::{Cookie, SignedCookieJar};

    let cookie = Cookie::build(("login-session", token.to_string()))
        .path("/")
        .build();
    let jar = SignedCookieJar::new(state.cookie_key()).add(cookie);

    let response = (jar, ()).into_response();
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).to_string())
        .expect("jar produced no cookie")
}

/// Log in through the real endpoint and return the session cookie pair.
pub async fn login(app: &axum::Router, email: &str, password: &str) -> String {
    let (status, body, set_cookie) = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    set_cookie.expect("login did not set the session cookie")
}
