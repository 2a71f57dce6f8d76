//! Canonical user-facing error messages.
//!
//! Every failure path renders one of these constants in the response
//! envelope's `message` field, so clients can match on stable strings.

/// No valid session where one is required.
pub const AUTH_REQUIRED: &str = "Authentication required";
/// A valid session is present on a guest-only endpoint.
pub const ALREADY_AUTHENTICATED: &str = "Already authenticated";
/// The session's role does not grant the required permission.
pub const AUTHORIZATION_FAILED: &str = "Authorization failed";
/// The account's email address has not been confirmed.
pub const NOT_CONFIRMED: &str = "Email address not confirmed";
/// The account is marked inactive.
pub const INACTIVE_ACCOUNT: &str = "Account is inactive";
/// The account is banned.
pub const BANNED: &str = "Account is banned";
/// Login credentials did not match.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
/// Generic message for unexpected internal failures; the cause is logged,
/// never serialized.
pub const INTERNAL_ERROR: &str = "Something went wrong";
/// No route matched the request.
pub const NOT_FOUND: &str = "Not found";
