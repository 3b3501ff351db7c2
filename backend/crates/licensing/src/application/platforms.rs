//! Platform Use Cases

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{PlatformId, SectorId};

use super::input::{optional, required, unique};
use crate::application::config::LicensingConfig;
use crate::domain::entity::platform::Platform;
use crate::domain::repository::{PlatformFilter, PlatformRepository};
use crate::domain::value_object::{
    license::{License, LicenseType},
    platform_status::PlatformStatus,
};
use crate::error::{LicensingError, LicensingResult};

#[derive(Debug, Clone, Default)]
pub struct ListPlatformsInput {
    pub filter: PlatformFilter,
    /// Keep only platforms inside the configured expiry window
    pub expiring: bool,
}

pub struct ListPlatformsUseCase<R>
where
    R: PlatformRepository,
{
    repo: Arc<R>,
    config: Arc<LicensingConfig>,
}

impl<R> ListPlatformsUseCase<R>
where
    R: PlatformRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LicensingConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: ListPlatformsInput) -> LicensingResult<Vec<Platform>> {
        let platforms = self.repo.list_platforms(&input.filter).await?;

        if input.expiring {
            Ok(self.config.expiry.select(platforms, Utc::now()))
        } else {
            Ok(platforms)
        }
    }
}

/// Create / replace input
///
/// On update every field is replaced except `status`, which is kept when
/// absent. A missing sector list means the empty set.
#[derive(Debug, Clone)]
pub struct PlatformInput {
    pub name: String,
    pub description: Option<String>,
    pub license_type: LicenseType,
    pub license_quantity: Option<i64>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub status: Option<PlatformStatus>,
    pub sector_ids: Vec<SectorId>,
}

impl PlatformInput {
    fn apply(self, platform: &mut Platform) -> LicensingResult<Vec<SectorId>> {
        platform.name = required(&self.name, "Name")?;
        platform.description = optional(self.description);
        platform.license = License::new(self.license_type, self.license_quantity)?;
        platform.expiration_date = self.expiration_date;
        if let Some(status) = self.status {
            platform.status = status;
        }
        Ok(unique(&self.sector_ids))
    }
}

pub struct CreatePlatformUseCase<R>
where
    R: PlatformRepository,
{
    repo: Arc<R>,
}

impl<R> CreatePlatformUseCase<R>
where
    R: PlatformRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: PlatformInput) -> LicensingResult<Platform> {
        let mut platform = Platform::new(String::new(), License::Unlimited, PlatformStatus::Active);
        let sector_ids = input.apply(&mut platform)?;

        self.repo.create_platform(&platform, &sector_ids).await?;

        tracing::info!(
            platform_id = %platform.id,
            license = %platform.license.kind(),
            sectors = sector_ids.len(),
            "Platform created"
        );

        Ok(self
            .repo
            .find_platform(platform.id)
            .await?
            .unwrap_or(platform))
    }
}

pub struct UpdatePlatformUseCase<R>
where
    R: PlatformRepository,
{
    repo: Arc<R>,
}

impl<R> UpdatePlatformUseCase<R>
where
    R: PlatformRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: PlatformId, input: PlatformInput) -> LicensingResult<Platform> {
        let mut platform = self
            .repo
            .find_platform(id)
            .await?
            .ok_or(LicensingError::PlatformNotFound)?;

        let sector_ids = input.apply(&mut platform)?;
        platform.touch();

        if !self.repo.update_platform(&platform, &sector_ids).await? {
            return Err(LicensingError::PlatformNotFound);
        }

        tracing::info!(platform_id = %id, sectors = sector_ids.len(), "Platform updated");

        self.repo
            .find_platform(id)
            .await?
            .ok_or(LicensingError::PlatformNotFound)
    }
}

pub struct DeletePlatformUseCase<R>
where
    R: PlatformRepository,
{
    repo: Arc<R>,
}

impl<R> DeletePlatformUseCase<R>
where
    R: PlatformRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: PlatformId) -> LicensingResult<()> {
        if !self.repo.delete_platform(id).await? {
            return Err(LicensingError::PlatformNotFound);
        }

        tracing::info!(platform_id = %id, "Platform deleted");
        Ok(())
    }
}
