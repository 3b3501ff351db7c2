//! Expiring-soon selection
//!
//! A platform is expiring when its expiration date lies within
//! `[now, now + horizon]`, both ends inclusive. Platforms without an
//! expiration date never expire.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entity::platform::Platform;

/// Days ahead that count as "expiring soon"
pub const DEFAULT_HORIZON_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryWindow {
    pub horizon: Duration,
    /// Also keep platforms whose date has already passed
    pub include_expired: bool,
    /// Only keep `ACTIVE` platforms
    pub require_active: bool,
}

impl Default for ExpiryWindow {
    fn default() -> Self {
        Self {
            horizon: Duration::days(DEFAULT_HORIZON_DAYS),
            include_expired: false,
            require_active: false,
        }
    }
}

impl ExpiryWindow {
    pub fn requiring_active(self) -> Self {
        Self {
            require_active: true,
            ..self
        }
    }

    pub fn includes(&self, platform: &Platform, now: DateTime<Utc>) -> bool {
        let Some(expires_at) = platform.expiration_date else {
            return false;
        };

        if expires_at > now + self.horizon {
            return false;
        }
        if !self.include_expired && expires_at < now {
            return false;
        }
        !self.require_active || platform.status.is_active()
    }

    pub fn select(&self, platforms: Vec<Platform>, now: DateTime<Utc>) -> Vec<Platform> {
        platforms
            .into_iter()
            .filter(|p| self.includes(p, now))
            .collect()
    }
}
