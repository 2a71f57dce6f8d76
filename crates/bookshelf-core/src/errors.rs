//! Application error taxonomy.
//!
//! Every error that can cross the chain boundary is an [`AppError`].
//! `IntoResponse` renders the standard envelope, so a failed gate or
//! handler short-circuits into the same JSON shape as a success response.
//! Internal errors keep their cause private: the `anyhow` chain is logged
//! and the client only ever sees a fixed safe message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::messages;
use crate::response::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    /// No or unusable session where one is required (403).
    #[error("{}", messages::AUTH_REQUIRED)]
    AuthRequired,
    /// A valid session on a guest-only endpoint (400).
    #[error("{}", messages::ALREADY_AUTHENTICATED)]
    AlreadyAuthenticated,
    /// Role or permission denial (401). Never carries the deny reason.
    #[error("{}", messages::AUTHORIZATION_FAILED)]
    AuthorizationFailed,
    /// Email not confirmed (400).
    #[error("{}", messages::NOT_CONFIRMED)]
    NotConfirmed,
    /// Account marked inactive (401).
    #[error("{}", messages::INACTIVE_ACCOUNT)]
    InactiveAccount,
    /// Account banned (401).
    #[error("{}", messages::BANNED)]
    Banned,
    /// Login credentials did not match (422).
    #[error("{}", messages::INVALID_CREDENTIALS)]
    InvalidCredentials,
    /// Request shape failure from body or params validation (422).
    #[error("{0}")]
    Validation(String),
    /// Malformed request outside of field validation (400).
    #[error("{0}")]
    BadRequest(String),
    /// Addressed entity does not exist (404).
    #[error("{0}")]
    NotFound(String),
    /// Unexpected internal failure (500). Rendered with a safe message.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::AuthRequired => StatusCode::FORBIDDEN,
            Self::AlreadyAuthenticated | Self::NotConfirmed => StatusCode::BAD_REQUEST,
            Self::AuthorizationFailed | Self::InactiveAccount | Self::Banned => {
                StatusCode::UNAUTHORIZED
            }
            Self::InvalidCredentials | Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            Self::Internal(cause) => {
                tracing::error!(error = %cause, "internal error reached the chain boundary");
                messages::INTERNAL_ERROR.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ApiResponse::failure(message))).into_response()
    }
}
