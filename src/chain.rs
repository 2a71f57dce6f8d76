//! Middleware chain execution.
//!
//! A route's chain is an ordered list of [`Gate`]s followed by a terminal
//! [`Handler`]. The request context is threaded through the chain by
//! value: a gate takes ownership, may enrich it (attach the principal,
//! for instance), and hands it to the next step via [`Step::Continue`].
//! A gate that writes a response ([`Step::Respond`]) or fails
//! (`Err(AppError)`) short-circuits the chain — later gates and the
//! handler never run, and errors become the standard envelope right here
//! at the chain boundary.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Key, SignedCookieJar};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use bookshelf_core::rbac::Principal;
use bookshelf_core::AppError;

use crate::state::AppState;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// What a gate decided about the request.
pub enum Step {
    /// Hand the (possibly enriched) context to the next step.
    Continue(RequestContext),
    /// Terminate the chain with this response.
    Respond(Response),
}

pub type GateResult = Result<Step, AppError>;

/// One middleware step in a route's chain.
pub type Gate = Arc<dyn Fn(AppState, RequestContext) -> BoxFuture<GateResult> + Send + Sync>;

/// The terminal step of a route's chain.
pub type Handler =
    Arc<dyn Fn(AppState, RequestContext) -> BoxFuture<Result<Response, AppError>> + Send + Sync>;

/// Wrap a plain async fn as a [`Gate`].
pub fn gate_fn<F, Fut>(f: F) -> Gate
where
    F: Fn(AppState, RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = GateResult> + Send + 'static,
{
    Arc::new(move |state, ctx| Box::pin(f(state, ctx)))
}

/// Wrap a plain async fn as a [`Handler`].
pub fn handler_fn<F, Fut>(f: F) -> Handler
where
    F: Fn(AppState, RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, AppError>> + Send + 'static,
{
    Arc::new(move |state, ctx| Box::pin(f(state, ctx)))
}

/// Request-scoped context threaded through a chain.
///
/// Owns everything a gate or handler needs from the request. Created per
/// request at dispatch and discarded with it; the principal slot is the
/// only part filled in along the way.
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    params: HashMap<String, String>,
    body: Bytes,
    principal: Option<Principal>,
}

impl RequestContext {
    pub fn new(
        method: Method,
        path: String,
        headers: HeaderMap,
        params: HashMap<String, String>,
        body: Bytes,
    ) -> Self {
        Self {
            method,
            path,
            headers,
            params,
            body,
            principal: None,
        }
    }

    /// Named path parameter captured during route matching.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Path parameter parsed as a UUID; anything else is a validation
    /// failure.
    pub fn uuid_param(&self, name: &str) -> Result<Uuid, AppError> {
        self.param(name)
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .ok_or_else(|| AppError::Validation(format!("{name} must be a valid id")))
    }

    /// Parse and validate the JSON request body.
    pub fn json<T>(&self) -> Result<T, AppError>
    where
        T: DeserializeOwned + Validate,
    {
        let value: T = serde_json::from_slice(&self.body).map_err(|err| {
            let raw = err.to_string();

            if let Some(field) = raw
                .split("missing field `")
                .nth(1)
                .and_then(|s| s.split('`').next())
            {
                return AppError::BadRequest(format!("{field} is required"));
            }

            AppError::BadRequest("Invalid request body".to_string())
        })?;

        value
            .validate()
            .map_err(|errors| AppError::Validation(format_errors(&errors)))?;

        Ok(value)
    }

    /// The request's signed cookie jar, verified against `key`.
    pub fn signed_cookies(&self, key: Key) -> SignedCookieJar {
        SignedCookieJar::from_headers(&self.headers, key)
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn attach_principal(&mut self, principal: Principal) {
        self.principal = Some(principal);
    }
}

fn format_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().filter_map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .or_else(|| Some(format!("{field} is invalid")))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Run `gates` in declared order, then `handler`, short-circuiting on the
/// first response or failure.
pub async fn execute(
    state: AppState,
    gates: &[Gate],
    handler: &Handler,
    mut ctx: RequestContext,
) -> Response {
    for gate in gates {
        match gate(state.clone(), ctx).await {
            Ok(Step::Continue(next)) => ctx = next,
            Ok(Step::Respond(response)) => return response,
            Err(err) => return err.into_response(),
        }
    }

    match handler(state, ctx).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
