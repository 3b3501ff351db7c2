//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;

use chrono::Duration;
use platform::token::TokenSigner;

/// Length of generated token secrets in bytes
const TOKEN_SECRET_LEN: usize = 32;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for signing access tokens
    pub token_secret: Vec<u8>,
    /// Lifetime of an issued access token (1 day)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            token_ttl: Duration::days(1),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Config with an explicit secret (production)
    pub fn with_secret(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            token_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Config with a random secret; tokens do not survive a restart
    pub fn with_random_secret() -> Self {
        Self::with_secret(platform::crypto::random_bytes(TOKEN_SECRET_LEN))
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn token_signer(&self) -> TokenSigner {
        TokenSigner::hs256(&self.token_secret)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
