//! User Entity

use auth::{Email, UserPassword, UserRole, UserStatus};
use chrono::{DateTime, Utc};
use kernel::id::UserId;

use super::related::PlatformRef;

/// Managed account
///
/// `platforms` is derived from the user/platform join table and is only
/// populated when the repository was asked to load it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub password: Option<UserPassword>,
    pub role: UserRole,
    pub sector: Option<String>,
    pub position: Option<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub platforms: Vec<PlatformRef>,
}

impl User {
    pub fn new(name: String, email: Email, role: UserRole, status: UserStatus) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name,
            email,
            password: None,
            role,
            sector: None,
            position: None,
            status,
            created_at: now,
            updated_at: now,
            platforms: Vec::new(),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
