//! Authentication gates.
//!
//! Sessions ride the signed `login-session` cookie. The jar signature
//! protects cookie integrity; the token inside carries the subject and
//! expiry. Authentication resolves the subject into a [`Principal`] with
//! a single store lookup, so role or status changes take effect on the
//! next request rather than at token expiry.
//!
//! The state gates (`require_email_confirmed`, `require_active`,
//! `require_not_banned`) read the principal attached earlier in the
//! chain; running one without `require_authenticated` before it denies
//! every request.

use anyhow::anyhow;
use tracing::warn;

use bookshelf_auth::verify_token;
use bookshelf_core::AppError;
use bookshelf_core::rbac::{AccountStatus, Principal};

use crate::chain::{Gate, RequestContext, Step, gate_fn};
use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "login-session";

/// Pull the session token out of the signed jar, if one is present and
/// its cookie signature checks out.
fn session_token(state: &AppState, ctx: &RequestContext) -> Option<String> {
    ctx.signed_cookies(state.cookie_key())
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Verify the session and resolve its principal, if the request carries
/// a usable session at all. Token verification failures are reported as
/// `Ok(None)`; store failures propagate.
async fn resolve_principal(
    state: &AppState,
    ctx: &RequestContext,
) -> Result<Option<Principal>, AppError> {
    let Some(token) = session_token(state, ctx) else {
        return Ok(None);
    };

    let Ok(subject) = verify_token(&token, &state.token_config) else {
        return Ok(None);
    };

    Ok(state.users.find_principal_by_subject(subject).await?)
}

/// Reject requests without a valid session; attach the principal for the
/// rest of the chain.
pub fn require_authenticated() -> Gate {
    gate_fn(|state: AppState, mut ctx: RequestContext| async move {
        let Some(token) = session_token(&state, &ctx) else {
            return Err(AppError::AuthRequired);
        };

        // The jar signature already vouched for this cookie, so a token
        // that fails verification here points at the server (secret
        // rotation, clock trouble), not the client.
        let subject = verify_token(&token, &state.token_config)
            .map_err(|_| AppError::internal(anyhow!("signed session cookie failed token verification")))?;

        let Some(principal) = state.users.find_principal_by_subject(subject).await? else {
            warn!(%subject, "session token for a subject that no longer exists");
            return Err(AppError::AuthRequired);
        };

        ctx.attach_principal(principal);
        Ok(Step::Continue(ctx))
    })
}

/// Reject requests that already carry a valid session. Absent or
/// unusable sessions pass: the visitor counts as a guest.
pub fn require_guest() -> Gate {
    gate_fn(|state: AppState, ctx: RequestContext| async move {
        if resolve_principal(&state, &ctx).await?.is_some() {
            return Err(AppError::AlreadyAuthenticated);
        }
        Ok(Step::Continue(ctx))
    })
}

/// Attach the principal when a valid session is present; pass everyone
/// through either way.
pub fn pass_user_if_present() -> Gate {
    gate_fn(|state: AppState, mut ctx: RequestContext| async move {
        if let Some(principal) = resolve_principal(&state, &ctx).await? {
            ctx.attach_principal(principal);
        }
        Ok(Step::Continue(ctx))
    })
}

fn attached_principal(ctx: &RequestContext) -> Result<&Principal, AppError> {
    ctx.principal().ok_or(AppError::AuthRequired)
}

pub fn require_email_confirmed() -> Gate {
    gate_fn(|_state: AppState, ctx: RequestContext| async move {
        if !attached_principal(&ctx)?.email_confirmed {
            return Err(AppError::NotConfirmed);
        }
        Ok(Step::Continue(ctx))
    })
}

pub fn require_active() -> Gate {
    gate_fn(|_state: AppState, ctx: RequestContext| async move {
        if attached_principal(&ctx)?.account_status == AccountStatus::Inactive {
            return Err(AppError::InactiveAccount);
        }
        Ok(Step::Continue(ctx))
    })
}

pub fn require_not_banned() -> Gate {
    gate_fn(|_state: AppState, ctx: RequestContext| async move {
        if attached_principal(&ctx)?.account_status == AccountStatus::Banned {
            return Err(AppError::Banned);
        }
        Ok(Step::Continue(ctx))
    })
}
