//! Association summaries
//!
//! The other side of a many-to-many link, reduced to what a listing shows.

use kernel::id::{PlatformId, SectorId, UserId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformRef {
    pub id: PlatformId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorRef {
    pub id: SectorId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
    pub email: String,
}
