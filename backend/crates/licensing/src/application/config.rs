//! Application Configuration
//!
//! Configuration for the Licensing application layer.

use std::fmt;

use crate::domain::services::expiry::ExpiryWindow;

#[derive(Clone, Default)]
pub struct LicensingConfig {
    /// Window used by `?expiring=true` and the admin expiring endpoint
    pub expiry: ExpiryWindow,
    /// Password pepper; must equal the one the auth crate verifies with
    pub password_pepper: Option<Vec<u8>>,
}

impl LicensingConfig {
    /// Create config for development
    pub fn development() -> Self {
        Self::default()
    }

    pub fn with_pepper(mut self, pepper: Option<Vec<u8>>) -> Self {
        self.password_pepper = pepper;
        self
    }

    pub fn including_expired(mut self, include_expired: bool) -> Self {
        self.expiry.include_expired = include_expired;
        self
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for LicensingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LicensingConfig")
            .field("expiry", &self.expiry)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
