//! # Bookshelf Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`token`]: session token signing secret and TTL policies
//! - [`cookie`]: cookie signing secret (distinct from the token secret)
//! - [`cors`]: CORS allowed origins
//!
//! Each type provides a `from_env()` constructor with development-safe
//! defaults. See each submodule for the variable names.

pub mod cookie;
pub mod cors;
pub mod token;

// Re-export commonly used types at crate root
pub use cookie::CookieConfig;
pub use cors::CorsConfig;
pub use token::TokenConfig;
