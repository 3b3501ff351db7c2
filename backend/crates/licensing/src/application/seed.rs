//! Start-up seeding
//!
//! Both steps are idempotent: sectors are only inserted into an empty
//! table, and the bootstrap admin only when its email is unused.

use std::sync::Arc;

use auth::{Email, RawPassword, UserPassword, UserRole, UserStatus};

use crate::application::config::LicensingConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{SectorRepository, UserRepository};
use crate::domain::services::sector_catalog::PREDEFINED_SECTORS;
use crate::error::LicensingResult;

pub struct SeedUseCase<R>
where
    R: UserRepository + SectorRepository,
{
    repo: Arc<R>,
    config: Arc<LicensingConfig>,
}

impl<R> SeedUseCase<R>
where
    R: UserRepository + SectorRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LicensingConfig>) -> Self {
        Self { repo, config }
    }

    /// Returns the number of sectors inserted
    pub async fn seed_sectors(&self) -> LicensingResult<u64> {
        let inserted = self.repo.seed_sectors_if_empty(&PREDEFINED_SECTORS).await?;
        if inserted > 0 {
            tracing::info!(count = inserted, "Seeded predefined sectors");
        }
        Ok(inserted)
    }

    /// Returns `true` when the account was created
    pub async fn ensure_admin(&self, email: &str, password: String) -> LicensingResult<bool> {
        let email = Email::new(email)?;
        if self.repo.find_user_by_email(&email).await?.is_some() {
            tracing::debug!(email = %email, "Bootstrap admin already present");
            return Ok(false);
        }

        let raw = RawPassword::new(password)?;
        let mut admin = User::new("Admin".to_string(), email, UserRole::Admin, UserStatus::Active);
        admin.password = Some(UserPassword::from_raw(&raw, self.config.pepper())?);

        self.repo.create_user(&admin, &[]).await?;

        tracing::info!(user_id = %admin.id, email = %admin.email, "Bootstrap admin created");
        Ok(true)
    }
}
