//! # Bookshelf Auth
//!
//! The session token service: issuing and verifying the signed,
//! time-limited credentials that ride the `login-session` cookie.
//!
//! Tokens are stateless — there is no server-side session storage. The
//! same process-wide secret signs and verifies (symmetric), and a token
//! is valid exactly while its signature matches and it has not expired.

pub mod claims;
pub mod token;

pub use claims::Claims;
pub use token::{TokenError, issue_token, verify_token};
