pub mod auth;
pub mod authorize;

pub use auth::{
    SESSION_COOKIE, pass_user_if_present, require_active, require_authenticated,
    require_email_confirmed, require_guest, require_not_banned,
};
pub use authorize::authorize;
