//! Platform Entity

use chrono::{DateTime, Utc};
use kernel::id::PlatformId;

use super::related::{SectorRef, UserRef};
use crate::domain::value_object::{license::License, platform_status::PlatformStatus};

/// Licensed software platform
///
/// `sectors` and `users` are derived from the join tables.
#[derive(Debug, Clone)]
pub struct Platform {
    pub id: PlatformId,
    pub name: String,
    pub description: Option<String>,
    pub license: License,
    pub expiration_date: Option<DateTime<Utc>>,
    pub status: PlatformStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sectors: Vec<SectorRef>,
    pub users: Vec<UserRef>,
}

impl Platform {
    pub fn new(name: String, license: License, status: PlatformStatus) -> Self {
        let now = Utc::now();
        Self {
            id: PlatformId::new(),
            name,
            description: None,
            license,
            expiration_date: None,
            status,
            created_at: now,
            updated_at: now,
            sectors: Vec::new(),
            users: Vec::new(),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
