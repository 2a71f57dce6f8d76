use std::env;

/// Session token configuration.
///
/// The secret signs and verifies tokens symmetrically and is immutable
/// process-wide configuration. The two TTLs implement the remember-me
/// policy chosen at login time.
#[derive(Clone, Debug)]
pub struct TokenConfig {
    pub secret: String,
    /// TTL in seconds for a plain session (remember-me off). Default 1 day.
    pub session_ttl: i64,
    /// TTL in seconds for a remember-me session. Default 365 days.
    pub remember_me_ttl: i64,
}

impl TokenConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("TOKEN_SECRET")
                .unwrap_or_else(|_| "your-token-secret-change-in-production".to_string()),
            session_ttl: env::var("SESSION_TTL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(86_400),
            remember_me_ttl: env::var("REMEMBER_ME_TTL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(31_536_000),
        }
    }
}
