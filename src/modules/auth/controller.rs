use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use tracing::info;

use bookshelf_core::{ApiResponse, AppError};

use crate::chain::RequestContext;
use crate::middleware::SESSION_COOKIE;
use crate::state::AppState;

use super::model::{LoginRequest, ProviderLoginRequest, SessionUser, SignupRequest};
use super::service::{AuthService, Session};

fn session_cookie(state: &AppState, session: &Session) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session.token.clone()))
        .path("/")
        .http_only(true)
        .secure(state.cookie_config.secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(session.ttl))
        .build()
}

fn session_response(state: &AppState, session: Session, status: StatusCode) -> Response {
    let jar = SignedCookieJar::new(state.cookie_key()).add(session_cookie(state, &session));
    let body = ApiResponse::ok(SessionUser::from(&session.user));
    (status, jar, Json(body)).into_response()
}

pub async fn login(state: AppState, ctx: RequestContext) -> Result<Response, AppError> {
    let dto: LoginRequest = ctx.json()?;
    let session = AuthService::login(&state, dto).await?;

    info!(user_id = %session.user.id, "user logged in");
    Ok(session_response(&state, session, StatusCode::OK))
}

pub async fn signup(state: AppState, ctx: RequestContext) -> Result<Response, AppError> {
    let dto: SignupRequest = ctx.json()?;
    let session = AuthService::signup(&state, dto).await?;

    info!(user_id = %session.user.id, "user signed up");
    Ok(session_response(&state, session, StatusCode::CREATED))
}

pub async fn login_with_provider(state: AppState, ctx: RequestContext) -> Result<Response, AppError> {
    let dto: ProviderLoginRequest = ctx.json()?;
    let (session, created) = AuthService::login_with_provider(&state, dto).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    info!(user_id = %session.user.id, created, "provider login");
    Ok(session_response(&state, session, status))
}

pub async fn logout(state: AppState, ctx: RequestContext) -> Result<Response, AppError> {
    let mut removal = Cookie::from(SESSION_COOKIE);
    removal.set_path("/");

    // The removal delta is only emitted for a cookie the jar has seen,
    // so the jar must be built from the request.
    let jar = ctx.signed_cookies(state.cookie_key()).remove(removal);
    Ok((jar, Json(ApiResponse::empty())).into_response())
}
