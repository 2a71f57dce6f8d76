//! Issue and verify session tokens.
//!
//! Verification failure is reported as a single opaque [`TokenError`]
//! regardless of whether the token was malformed, forged, or expired —
//! distinguishing those would hand probing clients an oracle.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use bookshelf_config::TokenConfig;

use crate::claims::Claims;

#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing failed. Only possible with unusable key material.
    #[error("failed to sign token")]
    Sign,
    /// Malformed, forged, or expired. Deliberately undifferentiated.
    #[error("invalid token")]
    Invalid,
}

/// Issue a token for `subject` expiring `ttl` seconds from now.
pub fn issue_token(subject: Uuid, ttl: i64, config: &TokenConfig) -> Result<String, TokenError> {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: subject.to_string(),
        iat: now,
        exp: now + ttl.max(0) as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|_| TokenError::Sign)
}

/// Verify `token` and return its subject.
///
/// Expiry is checked with zero leeway: a token is valid strictly while
/// the current time is before `exp`.
pub fn verify_token(token: &str, config: &TokenConfig) -> Result<Uuid, TokenError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|_| TokenError::Invalid)?;

    Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Invalid)
}
