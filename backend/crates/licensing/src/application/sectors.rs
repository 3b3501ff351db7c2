//! Sector Use Cases

use std::sync::Arc;

use kernel::id::SectorId;

use super::input::required;
use crate::domain::entity::sector::Sector;
use crate::domain::repository::SectorRepository;
use crate::error::{LicensingError, LicensingResult};

pub struct ListSectorsUseCase<R>
where
    R: SectorRepository,
{
    repo: Arc<R>,
}

impl<R> ListSectorsUseCase<R>
where
    R: SectorRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> LicensingResult<Vec<Sector>> {
        self.repo.list_sectors().await
    }
}

pub struct CreateSectorUseCase<R>
where
    R: SectorRepository,
{
    repo: Arc<R>,
}

impl<R> CreateSectorUseCase<R>
where
    R: SectorRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, name: &str) -> LicensingResult<Sector> {
        let sector = Sector::new(required(name, "Name")?);
        self.repo.create_sector(&sector).await?;

        tracing::info!(sector_id = %sector.id, name = %sector.name, "Sector created");
        Ok(sector)
    }
}

pub struct UpdateSectorUseCase<R>
where
    R: SectorRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateSectorUseCase<R>
where
    R: SectorRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: SectorId, name: &str) -> LicensingResult<Sector> {
        let name = required(name, "Name")?;
        let mut sector = self
            .repo
            .find_sector(id)
            .await?
            .ok_or(LicensingError::SectorNotFound)?;
        sector.name = name;

        if !self.repo.update_sector(&sector).await? {
            return Err(LicensingError::SectorNotFound);
        }

        tracing::info!(sector_id = %id, name = %sector.name, "Sector renamed");
        Ok(sector)
    }
}

pub struct DeleteSectorUseCase<R>
where
    R: SectorRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteSectorUseCase<R>
where
    R: SectorRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: SectorId) -> LicensingResult<()> {
        if !self.repo.delete_sector(id).await? {
            return Err(LicensingError::SectorNotFound);
        }

        tracing::info!(sector_id = %id, "Sector deleted");
        Ok(())
    }
}
