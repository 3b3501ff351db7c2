//! User Use Cases
//!
//! List, create, update and delete managed accounts.

use std::sync::Arc;

use auth::{Email, RawPassword, UserPassword, UserRole, UserStatus};
use kernel::id::{PlatformId, UserId};

use super::input::{optional, required, unique};
use crate::application::config::LicensingConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{LicensingError, LicensingResult};

pub struct ListUsersUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ListUsersUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, with_platforms: bool) -> LicensingResult<Vec<User>> {
        self.repo.list_users(with_platforms).await
    }
}

/// Create user input
#[derive(Debug, Default)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    /// Stored hashed; takes precedence over `generate_password`
    pub password: Option<String>,
    /// Generate a random password and return it once
    pub generate_password: bool,
    /// Defaults to `ADMIN`
    pub role: Option<UserRole>,
    pub sector: Option<String>,
    pub position: Option<String>,
    /// Defaults to `ACTIVE`
    pub status: Option<UserStatus>,
    pub platform_ids: Vec<PlatformId>,
}

#[derive(Debug)]
pub struct CreateUserOutput {
    pub user: User,
    /// Clear text of a generated password; never stored, never logged
    pub generated_password: Option<String>,
}

pub struct CreateUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<LicensingConfig>,
}

impl<R> CreateUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LicensingConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: CreateUserInput) -> LicensingResult<CreateUserOutput> {
        let name = required(&input.name, "Name")?;
        let email = Email::new(&input.email)?;

        if self.repo.find_user_by_email(&email).await?.is_some() {
            return Err(LicensingError::EmailTaken);
        }

        let mut user = User::new(
            name,
            email,
            input.role.unwrap_or(UserRole::Admin),
            input.status.unwrap_or(UserStatus::Active),
        );
        user.sector = optional(input.sector);
        user.position = optional(input.position);

        let mut generated_password = None;
        let raw = match optional(input.password) {
            Some(password) => Some(RawPassword::new(password)?),
            None if input.generate_password => {
                let raw = RawPassword::generate();
                generated_password = Some(raw.expose().to_string());
                Some(raw)
            }
            None => None,
        };
        user.password = raw
            .map(|raw| UserPassword::from_raw(&raw, self.config.pepper()))
            .transpose()?;

        let platform_ids = unique(&input.platform_ids);
        self.repo.create_user(&user, &platform_ids).await?;

        tracing::info!(
            user_id = %user.id,
            role = %user.role,
            platforms = platform_ids.len(),
            has_password = user.password.is_some(),
            "User created"
        );

        // Reload so the platform names are filled in
        let user = self.repo.find_user(user.id).await?.unwrap_or(user);

        Ok(CreateUserOutput {
            user,
            generated_password,
        })
    }
}

/// Partial update; `None` leaves a field unchanged
///
/// For `sector` and `position`, a blank string clears the value. A blank
/// password is treated as absent.
#[derive(Debug, Default)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub sector: Option<String>,
    pub position: Option<String>,
    pub status: Option<UserStatus>,
    /// Replaces the whole platform set when present
    pub platform_ids: Option<Vec<PlatformId>>,
}

pub struct UpdateUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<LicensingConfig>,
}

impl<R> UpdateUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<LicensingConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, id: UserId, input: UpdateUserInput) -> LicensingResult<User> {
        let mut user = self
            .repo
            .find_user(id)
            .await?
            .ok_or(LicensingError::UserNotFound)?;

        if let Some(name) = input.name {
            user.name = required(&name, "Name")?;
        }

        if let Some(email) = input.email {
            let email = Email::new(email)?;
            if email != user.email {
                let holder = self.repo.find_user_by_email(&email).await?;
                if holder.is_some_and(|other| other.id != user.id) {
                    return Err(LicensingError::EmailTaken);
                }
                user.email = email;
            }
        }

        if let Some(password) = optional(input.password) {
            let raw = RawPassword::new(password)?;
            user.password = Some(UserPassword::from_raw(&raw, self.config.pepper())?);
        }

        if let Some(role) = input.role {
            user.role = role;
        }
        if let Some(status) = input.status {
            user.status = status;
        }
        if input.sector.is_some() {
            user.sector = optional(input.sector);
        }
        if input.position.is_some() {
            user.position = optional(input.position);
        }
        user.touch();

        let platform_ids = input.platform_ids.as_deref().map(unique);
        if !self
            .repo
            .update_user(&user, platform_ids.as_deref())
            .await?
        {
            return Err(LicensingError::UserNotFound);
        }

        tracing::info!(
            user_id = %user.id,
            platforms_replaced = platform_ids.is_some(),
            "User updated"
        );

        self.repo
            .find_user(id)
            .await?
            .ok_or(LicensingError::UserNotFound)
    }
}

pub struct DeleteUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: UserId) -> LicensingResult<()> {
        if !self.repo.delete_user(id).await? {
            return Err(LicensingError::UserNotFound);
        }

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
