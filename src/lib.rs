//! # Bookshelf API
//!
//! A session-authenticated, role-authorized backend: routes are declared
//! in an explicit registry, every route runs an ordered gate chain over
//! an owned request context, and permissions are evaluated per resource
//! and action from the role attached to the session's user.

pub mod chain;
pub mod db;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod registry;
pub mod router;
pub mod state;
