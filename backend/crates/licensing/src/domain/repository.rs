//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Association lists passed to writes are complete sets: the stored links
//! are replaced, not merged. Ids in those lists must already exist, otherwise
//! the write fails with [`LicensingError::UnknownReference`] and nothing is
//! persisted.
//!
//! [`LicensingError::UnknownReference`]: crate::error::LicensingError::UnknownReference

use auth::Email;
use kernel::id::{PlatformId, SectorId, UserId};

use crate::domain::entity::{platform::Platform, sector::Sector, user::User};
use crate::domain::value_object::platform_status::PlatformStatus;
use crate::error::LicensingResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// All users, oldest first; `platforms` is filled when `with_platforms` is set
    async fn list_users(&self, with_platforms: bool) -> LicensingResult<Vec<User>>;

    /// Find user by ID, platforms included
    async fn find_user(&self, id: UserId) -> LicensingResult<Option<User>>;

    /// Find user by email, platforms included
    async fn find_user_by_email(&self, email: &Email) -> LicensingResult<Option<User>>;

    /// Insert the user and link it to `platform_ids`
    async fn create_user(&self, user: &User, platform_ids: &[PlatformId]) -> LicensingResult<()>;

    /// Update scalar fields; `Some(ids)` also replaces the platform links.
    /// Returns `false` when the user does not exist.
    async fn update_user(
        &self,
        user: &User,
        platform_ids: Option<&[PlatformId]>,
    ) -> LicensingResult<bool>;

    /// Delete the user and its platform links. Returns `false` when absent.
    async fn delete_user(&self, id: UserId) -> LicensingResult<bool>;
}

/// Listing filter for platforms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformFilter {
    /// Keep platforms linked to a sector with exactly this name
    pub sector_name: Option<String>,
    pub status: Option<PlatformStatus>,
}

/// Platform repository trait
#[trait_variant::make(PlatformRepository: Send)]
pub trait LocalPlatformRepository {
    /// Platforms matching `filter`, ordered by name, with sectors and users
    async fn list_platforms(&self, filter: &PlatformFilter) -> LicensingResult<Vec<Platform>>;

    async fn find_platform(&self, id: PlatformId) -> LicensingResult<Option<Platform>>;

    /// Insert the platform and link it to `sector_ids`
    async fn create_platform(
        &self,
        platform: &Platform,
        sector_ids: &[SectorId],
    ) -> LicensingResult<()>;

    /// Update scalar fields and replace the sector links.
    /// Returns `false` when the platform does not exist.
    async fn update_platform(
        &self,
        platform: &Platform,
        sector_ids: &[SectorId],
    ) -> LicensingResult<bool>;

    /// Delete the platform and its user and sector links. Returns `false` when absent.
    async fn delete_platform(&self, id: PlatformId) -> LicensingResult<bool>;
}

/// Sector repository trait
#[trait_variant::make(SectorRepository: Send)]
pub trait LocalSectorRepository {
    /// All sectors ordered by name
    async fn list_sectors(&self) -> LicensingResult<Vec<Sector>>;

    async fn find_sector(&self, id: SectorId) -> LicensingResult<Option<Sector>>;

    async fn create_sector(&self, sector: &Sector) -> LicensingResult<()>;

    /// Rename. Returns `false` when the sector does not exist.
    async fn update_sector(&self, sector: &Sector) -> LicensingResult<bool>;

    /// Delete the sector and its platform links. Returns `false` when absent.
    async fn delete_sector(&self, id: SectorId) -> LicensingResult<bool>;

    /// Insert `names` only if no sector exists yet; returns the number inserted
    async fn seed_sectors_if_empty(&self, names: &[&str]) -> LicensingResult<u64>;
}

/// Everything the licensing router needs from one shared store
pub trait LicensingStore:
    UserRepository + PlatformRepository + SectorRepository + Clone + Send + Sync + 'static
{
}

impl<T> LicensingStore for T where
    T: UserRepository + PlatformRepository + SectorRepository + Clone + Send + Sync + 'static
{
}
