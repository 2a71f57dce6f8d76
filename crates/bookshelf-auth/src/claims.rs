//! Claim structure embedded in session tokens.

use serde::{Deserialize, Serialize};

/// Session token claims.
///
/// Deliberately minimal: the subject identifies the user, and the role
/// and account state are looked up fresh on every authenticated request
/// rather than frozen into the token. Revoking a role takes effect on the
/// next request, not at token expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject claim).
    pub sub: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: usize,
    /// Expiry, seconds since the Unix epoch.
    pub exp: usize,
}
