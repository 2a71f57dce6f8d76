//! Route registration and dispatch.
//!
//! Routes are declared explicitly during process initialization: each
//! [`RouteDefinition`] carries its method, path pattern, ordered gate
//! chain, and handler, and is pushed into the [`RouteRegistry`]. The
//! registry is then frozen by [`RouteRegistry::build`] into an immutable
//! [`AppRouter`] before the first request is served. Registration
//! problems (duplicate routes, registering after the freeze) are fatal
//! startup errors — the process must not come up with a malformed route
//! table.
//!
//! Matching supports static segments and `:name` parameters. The first
//! declared route wins when patterns overlap for the same method;
//! declaration order is preserved exactly.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use bookshelf_core::{messages, ApiResponse, AppError};

use crate::chain::{self, Gate, Handler, RequestContext, handler_fn};
use crate::logging::request_logger;
use crate::state::AppState;

/// Request bodies above this size are rejected before the chain runs.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate route registered: {method} {path}")]
    DuplicateRoute { method: Method, path: String },
    #[error("route registry is frozen; routes must be registered before build")]
    Frozen,
}

/// One segment of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

#[derive(Debug, Clone)]
struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    fn parse(path: &str) -> Self {
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Static(s.to_string()),
            })
            .collect();

        Self {
            raw: path.to_string(),
            segments,
        }
    }

    /// Capture parameters if `path` matches this pattern.
    fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Static(s) if s == part => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), (*part).to_string());
                }
            }
        }

        Some(params)
    }

    /// Structural equivalence: parameter names are ignored, so
    /// `/users/:id` and `/users/:uid` count as the same pattern.
    fn conflicts_with(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| match (a, b) {
                    (Segment::Static(x), Segment::Static(y)) => x == y,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }
}

/// The pattern the dispatched route was declared with, tagged onto the
/// response so the logging layer can report the route rather than the
/// raw path.
#[derive(Debug, Clone)]
pub struct MatchedRoute(pub String);

/// A declared route: method, path pattern, ordered gates, handler.
pub struct RouteDefinition {
    method: Method,
    pattern: PathPattern,
    gates: Vec<Gate>,
    handler: Handler,
}

impl RouteDefinition {
    pub fn new<F, Fut>(method: Method, path: &str, handler: F) -> Self
    where
        F: Fn(AppState, RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response, AppError>> + Send + 'static,
    {
        Self {
            method,
            pattern: PathPattern::parse(path),
            gates: Vec::new(),
            handler: handler_fn(handler),
        }
    }

    pub fn get<F, Fut>(path: &str, handler: F) -> Self
    where
        F: Fn(AppState, RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response, AppError>> + Send + 'static,
    {
        Self::new(Method::GET, path, handler)
    }

    pub fn post<F, Fut>(path: &str, handler: F) -> Self
    where
        F: Fn(AppState, RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response, AppError>> + Send + 'static,
    {
        Self::new(Method::POST, path, handler)
    }

    pub fn patch<F, Fut>(path: &str, handler: F) -> Self
    where
        F: Fn(AppState, RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response, AppError>> + Send + 'static,
    {
        Self::new(Method::PATCH, path, handler)
    }

    pub fn delete<F, Fut>(path: &str, handler: F) -> Self
    where
        F: Fn(AppState, RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response, AppError>> + Send + 'static,
    {
        Self::new(Method::DELETE, path, handler)
    }

    /// Append a gate. Gates run in the order they were attached.
    pub fn gate(mut self, gate: Gate) -> Self {
        self.gates.push(gate);
        self
    }
}

/// Accumulates route definitions during the registration phase.
///
/// Registration is a startup-time, single-threaded sequence; the registry
/// is not shared until it has been built.
#[derive(Default)]
pub struct RouteRegistry {
    routes: Vec<RouteDefinition>,
    frozen: bool,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: RouteDefinition) -> Result<(), RegistryError> {
        if self.frozen {
            return Err(RegistryError::Frozen);
        }

        if self
            .routes
            .iter()
            .any(|r| r.method == definition.method && r.pattern.conflicts_with(&definition.pattern))
        {
            return Err(RegistryError::DuplicateRoute {
                method: definition.method.clone(),
                path: definition.pattern.raw.clone(),
            });
        }

        self.routes.push(definition);
        Ok(())
    }

    /// Freeze the registry into a dispatchable router. Any `register`
    /// (or repeated `build`) afterwards fails with [`RegistryError::Frozen`].
    pub fn build(&mut self) -> Result<AppRouter, RegistryError> {
        if self.frozen {
            return Err(RegistryError::Frozen);
        }

        self.frozen = true;
        Ok(AppRouter {
            routes: Arc::new(std::mem::take(&mut self.routes)),
        })
    }
}

/// The immutable, dispatchable route table. Cheap to clone; read-only
/// after build, so dispatch needs no locking.
#[derive(Clone)]
pub struct AppRouter {
    routes: Arc<Vec<RouteDefinition>>,
}

impl AppRouter {
    fn find(&self, method: &Method, path: &str) -> Option<(&RouteDefinition, HashMap<String, String>)> {
        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| route.pattern.matches(path).map(|params| (route, params)))
    }

    pub async fn dispatch(&self, state: AppState, request: Request) -> Response {
        let (parts, body) = request.into_parts();
        let path = parts.uri.path().to_string();

        let Some((route, params)) = self.find(&parts.method, &path) else {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::failure(messages::NOT_FOUND)),
            )
                .into_response();
        };

        let body = match axum::body::to_bytes(body, BODY_LIMIT).await {
            Ok(bytes) => bytes,
            Err(_) => {
                return AppError::BadRequest("Unable to read request body".to_string())
                    .into_response();
            }
        };

        let ctx = RequestContext::new(parts.method, path, parts.headers, params, body);
        let mut response = chain::execute(state, &route.gates, &route.handler, ctx).await;
        response
            .extensions_mut()
            .insert(MatchedRoute(route.pattern.raw.clone()));
        response
    }

    /// Wrap dispatch into an axum service with the CORS and request
    /// logging layers applied.
    pub fn into_service(self, state: AppState) -> axum::Router {
        let allowed_origins: Vec<axum::http::HeaderValue> = state
            .cors_config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        let cors = tower_http::cors::CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_credentials(true);

        let router = self;
        axum::Router::new()
            .fallback(move |request: Request<Body>| {
                let router = router.clone();
                let state = state.clone();
                async move { router.dispatch(state, request).await }
            })
            .layer(cors)
            .layer(axum::middleware::from_fn(request_logger))
    }
}
