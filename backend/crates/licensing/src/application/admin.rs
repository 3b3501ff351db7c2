//! Admin Use Cases

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;

use crate::application::config::LicensingConfig;
use crate::domain::entity::{platform::Platform, user::User};
use crate::domain::repository::{PlatformFilter, PlatformRepository, UserRepository};
use crate::domain::value_object::platform_status::PlatformStatus;
use crate::error::{LicensingError, LicensingResult};

/// Flip a user's role between `ADMIN` and `USER`
pub struct ToggleAdminUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ToggleAdminUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: UserId) -> LicensingResult<User> {
        let mut user = self
            .repo
            .find_user(id)
            .await?
            .ok_or(LicensingError::UserNotFound)?;

        user.role = user.role.toggled();
        user.touch();

        if !self.repo.update_user(&user, None).await? {
            return Err(LicensingError::UserNotFound);
        }

        tracing::info!(user_id = %id, role = %user.role, "User role toggled");
        Ok(user)
    }
}

/// Active platforms inside the expiry window
pub struct ExpiringPlatformsUseCase<R>
where
    R: PlatformRepository,
{
    repo: Arc<R>,
    config: Arc<LicensingConfig>,
}

impl<R> ExpiringPlatformsUseCase<R>
where
    R: PlatformRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LicensingConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self) -> LicensingResult<Vec<Platform>> {
        let filter = PlatformFilter {
            status: Some(PlatformStatus::Active),
            ..Default::default()
        };
        let platforms = self.repo.list_platforms(&filter).await?;

        Ok(self
            .config
            .expiry
            .requiring_active()
            .select(platforms, Utc::now()))
    }
}
