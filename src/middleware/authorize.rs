//! Permission gate factory.

use bookshelf_core::AppError;
use bookshelf_core::rbac::{Access, Actions, Resource, evaluate};

use crate::chain::{Gate, RequestContext, Step, gate_fn};
use crate::state::AppState;

/// Build a gate requiring `required` actions on `resource`.
///
/// Must run after `require_authenticated` (or another principal-attaching
/// gate): a missing principal is an authentication failure, not a
/// permission denial. The deny response never says which permission was
/// missing.
pub fn authorize(resource: Resource, required: Actions) -> Gate {
    gate_fn(move |_state: AppState, ctx: RequestContext| async move {
        let decision = match ctx.principal() {
            Some(principal) => evaluate(principal, resource, required),
            None => return Err(AppError::AuthRequired),
        };

        if decision == Access::Deny {
            return Err(AppError::AuthorizationFailed);
        }

        Ok(Step::Continue(ctx))
    })
}
