//! Sector Entity

use chrono::{DateTime, Utc};
use kernel::id::SectorId;

/// Organisational unit; the name is unique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sector {
    pub id: SectorId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Sector {
    pub fn new(name: String) -> Self {
        Self {
            id: SectorId::new(),
            name,
            created_at: Utc::now(),
        }
    }
}
