use std::env;

/// Cookie signing configuration.
///
/// The cookie secret is deliberately separate from the token secret:
/// forging a session requires both. The signing key needs 64 bytes of
/// material, so short secrets are stretched by repetition rather than
/// rejected at startup.
#[derive(Clone, Debug)]
pub struct CookieConfig {
    pub secret: String,
    /// Mark cookies `Secure` (HTTPS only). Off by default for local use.
    pub secure: bool,
}

impl CookieConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("COOKIE_SECRET")
                .unwrap_or_else(|_| "your-cookie-secret-change-in-production".to_string()),
            secure: env::var("COOKIE_SECURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Signing key material, stretched to the 64 bytes a full key wants.
    pub fn key_material(&self) -> Vec<u8> {
        let mut material = self.secret.as_bytes().to_vec();
        while material.len() < 64 {
            material.extend_from_slice(self.secret.as_bytes());
        }
        material
    }
}
