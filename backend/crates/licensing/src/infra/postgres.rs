//! PostgreSQL Repository Implementation
//!
//! One repository type implements all three traits over a shared pool.
//! Association lists are bound as `uuid[]` and expanded with `UNNEST`.

use std::collections::HashMap;

use auth::{Email, UserPassword, UserRole, UserStatus};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use kernel::id::{PlatformId, SectorId, UserId};

use crate::domain::entity::{
    platform::Platform,
    related::{PlatformRef, SectorRef, UserRef},
    sector::Sector,
    user::User,
};
use crate::domain::repository::{
    PlatformFilter, PlatformRepository, SectorRepository, UserRepository,
};
use crate::domain::value_object::{license::License, platform_status::PlatformStatus};
use crate::error::{LicensingError, LicensingResult};

/// PostgreSQL-backed licensing repository
#[derive(Clone)]
pub struct PgLicensingRepository {
    pool: PgPool,
}

impl PgLicensingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn platforms_by_user(
        &self,
        user_ids: &[Uuid],
    ) -> LicensingResult<HashMap<Uuid, Vec<PlatformRef>>> {
        let links = sqlx::query_as::<_, PlatformLinkRow>(
            r#"
            SELECT up.user_id AS owner_id, p.platform_id, p.name
            FROM user_platforms up
            JOIN platforms p ON p.platform_id = up.platform_id
            WHERE up.user_id = ANY($1)
            ORDER BY p.name
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<PlatformRef>> = HashMap::new();
        for link in links {
            grouped.entry(link.owner_id).or_default().push(PlatformRef {
                id: PlatformId::from_uuid(link.platform_id),
                name: link.name,
            });
        }
        Ok(grouped)
    }

    async fn hydrate_users(
        &self,
        rows: Vec<UserRow>,
        with_platforms: bool,
    ) -> LicensingResult<Vec<User>> {
        let mut platforms = if with_platforms {
            let ids: Vec<Uuid> = rows.iter().map(|r| r.user_id).collect();
            self.platforms_by_user(&ids).await?
        } else {
            HashMap::new()
        };

        rows.into_iter()
            .map(|row| {
                let linked = platforms.remove(&row.user_id).unwrap_or_default();
                row.into_user(linked)
            })
            .collect()
    }

    async fn hydrate_platforms(&self, rows: Vec<PlatformRow>) -> LicensingResult<Vec<Platform>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.platform_id).collect();

        let sector_links = sqlx::query_as::<_, SectorLinkRow>(
            r#"
            SELECT ps.platform_id AS owner_id, s.sector_id, s.name
            FROM platform_sectors ps
            JOIN sectors s ON s.sector_id = ps.sector_id
            WHERE ps.platform_id = ANY($1)
            ORDER BY s.name
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let user_links = sqlx::query_as::<_, UserLinkRow>(
            r#"
            SELECT up.platform_id AS owner_id, u.user_id, u.name, u.email
            FROM user_platforms up
            JOIN users u ON u.user_id = up.user_id
            WHERE up.platform_id = ANY($1)
            ORDER BY u.name
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut sectors: HashMap<Uuid, Vec<SectorRef>> = HashMap::new();
        for link in sector_links {
            sectors.entry(link.owner_id).or_default().push(SectorRef {
                id: SectorId::from_uuid(link.sector_id),
                name: link.name,
            });
        }

        let mut users: HashMap<Uuid, Vec<UserRef>> = HashMap::new();
        for link in user_links {
            users.entry(link.owner_id).or_default().push(UserRef {
                id: UserId::from_uuid(link.user_id),
                name: link.name,
                email: link.email,
            });
        }

        rows.into_iter()
            .map(|row| {
                let id = row.platform_id;
                row.into_platform(
                    sectors.remove(&id).unwrap_or_default(),
                    users.remove(&id).unwrap_or_default(),
                )
            })
            .collect()
    }
}

fn uuids<T>(ids: &[kernel::id::Id<T>]) -> Vec<Uuid> {
    ids.iter().map(|id| id.into_uuid()).collect()
}

const USER_COLUMNS: &str = r#"
    user_id, name, email, password_hash, user_role, sector, position,
    user_status, created_at, updated_at
"#;

const PLATFORM_COLUMNS: &str = r#"
    platform_id, name, description, license_type, license_quantity,
    expiration_date, platform_status, created_at, updated_at
"#;

impl UserRepository for PgLicensingRepository {
    async fn list_users(&self, with_platforms: bool) -> LicensingResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, name"
        ))
        .fetch_all(&self.pool)
        .await?;

        self.hydrate_users(rows, with_platforms).await
    }

    async fn find_user(&self, id: UserId) -> LicensingResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let users = self.hydrate_users(row.into_iter().collect(), true).await?;
        Ok(users.into_iter().next())
    }

    async fn find_user_by_email(&self, email: &Email) -> LicensingResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let users = self.hydrate_users(row.into_iter().collect(), true).await?;
        Ok(users.into_iter().next())
    }

    async fn create_user(&self, user: &User, platform_ids: &[PlatformId]) -> LicensingResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id, name, email, password_hash, user_role, sector, position,
                user_status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(user.password.as_ref().map(UserPassword::as_phc_string))
        .bind(user.role.id())
        .bind(&user.sector)
        .bind(&user.position)
        .bind(user.status.id())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await?;

        if !platform_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO user_platforms (user_id, platform_id)
                SELECT $1, UNNEST($2::uuid[])
                "#,
            )
            .bind(user.id.as_uuid())
            .bind(uuids(platform_ids))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn update_user(
        &self,
        user: &User,
        platform_ids: Option<&[PlatformId]>,
    ) -> LicensingResult<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2,
                email = $3,
                password_hash = $4,
                user_role = $5,
                sector = $6,
                position = $7,
                user_status = $8,
                updated_at = $9
            WHERE user_id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(user.password.as_ref().map(UserPassword::as_phc_string))
        .bind(user.role.id())
        .bind(&user.sector)
        .bind(&user.position)
        .bind(user.status.id())
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        if let Some(platform_ids) = platform_ids {
            sqlx::query("DELETE FROM user_platforms WHERE user_id = $1")
                .bind(user.id.as_uuid())
                .execute(&mut *tx)
                .await?;

            if !platform_ids.is_empty() {
                sqlx::query(
                    r#"
                    INSERT INTO user_platforms (user_id, platform_id)
                    SELECT $1, UNNEST($2::uuid[])
                    "#,
                )
                .bind(user.id.as_uuid())
                .bind(uuids(platform_ids))
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn delete_user(&self, id: UserId) -> LicensingResult<bool> {
        // user_platforms rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl PlatformRepository for PgLicensingRepository {
    async fn list_platforms(&self, filter: &PlatformFilter) -> LicensingResult<Vec<Platform>> {
        let rows = sqlx::query_as::<_, PlatformRow>(&format!(
            r#"
            SELECT {PLATFORM_COLUMNS}
            FROM platforms p
            WHERE ($1::text IS NULL OR EXISTS (
                    SELECT 1
                    FROM platform_sectors ps
                    JOIN sectors s ON s.sector_id = ps.sector_id
                    WHERE ps.platform_id = p.platform_id AND s.name = $1
                ))
              AND ($2::smallint IS NULL OR p.platform_status = $2)
            ORDER BY p.name
            "#
        ))
        .bind(filter.sector_name.as_deref())
        .bind(filter.status.map(|s| s.id()))
        .fetch_all(&self.pool)
        .await?;

        self.hydrate_platforms(rows).await
    }

    async fn find_platform(&self, id: PlatformId) -> LicensingResult<Option<Platform>> {
        let row = sqlx::query_as::<_, PlatformRow>(&format!(
            "SELECT {PLATFORM_COLUMNS} FROM platforms WHERE platform_id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let platforms = self.hydrate_platforms(row.into_iter().collect()).await?;
        Ok(platforms.into_iter().next())
    }

    async fn create_platform(
        &self,
        platform: &Platform,
        sector_ids: &[SectorId],
    ) -> LicensingResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO platforms (
                platform_id, name, description, license_type, license_quantity,
                expiration_date, platform_status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(platform.id.as_uuid())
        .bind(&platform.name)
        .bind(&platform.description)
        .bind(platform.license.kind().id())
        .bind(platform.license.quantity_for_db())
        .bind(platform.expiration_date)
        .bind(platform.status.id())
        .bind(platform.created_at)
        .bind(platform.updated_at)
        .execute(&mut *tx)
        .await?;

        if !sector_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO platform_sectors (platform_id, sector_id)
                SELECT $1, UNNEST($2::uuid[])
                "#,
            )
            .bind(platform.id.as_uuid())
            .bind(uuids(sector_ids))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn update_platform(
        &self,
        platform: &Platform,
        sector_ids: &[SectorId],
    ) -> LicensingResult<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE platforms
            SET name = $2,
                description = $3,
                license_type = $4,
                license_quantity = $5,
                expiration_date = $6,
                platform_status = $7,
                updated_at = $8
            WHERE platform_id = $1
            "#,
        )
        .bind(platform.id.as_uuid())
        .bind(&platform.name)
        .bind(&platform.description)
        .bind(platform.license.kind().id())
        .bind(platform.license.quantity_for_db())
        .bind(platform.expiration_date)
        .bind(platform.status.id())
        .bind(platform.updated_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM platform_sectors WHERE platform_id = $1")
            .bind(platform.id.as_uuid())
            .execute(&mut *tx)
            .await?;

        if !sector_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO platform_sectors (platform_id, sector_id)
                SELECT $1, UNNEST($2::uuid[])
                "#,
            )
            .bind(platform.id.as_uuid())
            .bind(uuids(sector_ids))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn delete_platform(&self, id: PlatformId) -> LicensingResult<bool> {
        let result = sqlx::query("DELETE FROM platforms WHERE platform_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl SectorRepository for PgLicensingRepository {
    async fn list_sectors(&self) -> LicensingResult<Vec<Sector>> {
        let rows = sqlx::query_as::<_, SectorRow>(
            "SELECT sector_id, name, created_at FROM sectors ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SectorRow::into_sector).collect())
    }

    async fn find_sector(&self, id: SectorId) -> LicensingResult<Option<Sector>> {
        let row = sqlx::query_as::<_, SectorRow>(
            "SELECT sector_id, name, created_at FROM sectors WHERE sector_id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SectorRow::into_sector))
    }

    async fn create_sector(&self, sector: &Sector) -> LicensingResult<()> {
        sqlx::query("INSERT INTO sectors (sector_id, name, created_at) VALUES ($1, $2, $3)")
            .bind(sector.id.as_uuid())
            .bind(&sector.name)
            .bind(sector.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_sector(&self, sector: &Sector) -> LicensingResult<bool> {
        let result = sqlx::query("UPDATE sectors SET name = $2 WHERE sector_id = $1")
            .bind(sector.id.as_uuid())
            .bind(&sector.name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_sector(&self, id: SectorId) -> LicensingResult<bool> {
        let result = sqlx::query("DELETE FROM sectors WHERE sector_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn seed_sectors_if_empty(&self, names: &[&str]) -> LicensingResult<u64> {
        let mut tx = self.pool.begin().await?;

        // Serialises concurrent start-ups on the emptiness check
        sqlx::query("LOCK TABLE sectors IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sectors")
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            return Ok(0);
        }

        let ids: Vec<Uuid> = names.iter().map(|_| Uuid::new_v4()).collect();
        let names: Vec<String> = names.iter().map(|n| (*n).to_string()).collect();

        let result = sqlx::query(
            r#"
            INSERT INTO sectors (sector_id, name)
            SELECT * FROM UNNEST($1::uuid[], $2::text[])
            "#,
        )
        .bind(&ids)
        .bind(&names)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    email: String,
    password_hash: Option<String>,
    user_role: i16,
    sector: Option<String>,
    position: Option<String>,
    user_status: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self, platforms: Vec<PlatformRef>) -> LicensingResult<User> {
        let role = UserRole::from_id(self.user_role).ok_or_else(|| {
            LicensingError::Internal(format!("Invalid user_role: {}", self.user_role))
        })?;
        let status = UserStatus::from_id(self.user_status).ok_or_else(|| {
            LicensingError::Internal(format!("Invalid user_status: {}", self.user_status))
        })?;

        let password = self
            .password_hash
            .map(UserPassword::from_phc_string)
            .transpose()?;

        Ok(User {
            id: UserId::from_uuid(self.user_id),
            name: self.name,
            email: Email::from_db(self.email),
            password,
            role,
            sector: self.sector,
            position: self.position,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            platforms,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PlatformRow {
    platform_id: Uuid,
    name: String,
    description: Option<String>,
    license_type: i16,
    license_quantity: Option<i32>,
    expiration_date: Option<DateTime<Utc>>,
    platform_status: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PlatformRow {
    fn into_platform(self, sectors: Vec<SectorRef>, users: Vec<UserRef>) -> LicensingResult<Platform> {
        let status = PlatformStatus::from_id(self.platform_status).ok_or_else(|| {
            LicensingError::Internal(format!("Invalid platform_status: {}", self.platform_status))
        })?;

        Ok(Platform {
            id: PlatformId::from_uuid(self.platform_id),
            name: self.name,
            description: self.description,
            license: License::from_db(self.license_type, self.license_quantity)?,
            expiration_date: self.expiration_date,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            sectors,
            users,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SectorRow {
    sector_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl SectorRow {
    fn into_sector(self) -> Sector {
        Sector {
            id: SectorId::from_uuid(self.sector_id),
            name: self.name,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PlatformLinkRow {
    owner_id: Uuid,
    platform_id: Uuid,
    name: String,
}

#[derive(sqlx::FromRow)]
struct SectorLinkRow {
    owner_id: Uuid,
    sector_id: Uuid,
    name: String,
}

#[derive(sqlx::FromRow)]
struct UserLinkRow {
    owner_id: Uuid,
    user_id: Uuid,
    name: String,
    email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Connects and migrates, or returns `None` when `DATABASE_URL` is unset
    async fn database() -> Option<PgLicensingRepository> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("SKIP-POSTGRES: DATABASE_URL is not set");
            return None;
        };
        let pool = PgPool::connect(&url).await.unwrap();
        sqlx::migrate!("../../../database/migrations")
            .run(&pool)
            .await
            .unwrap();
        Some(PgLicensingRepository::new(pool))
    }

    fn unique(prefix: &str) -> String {
        format!("{}-{}", prefix, Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_failed_sector_replacement_keeps_previous_links() {
        let Some(repo) = database().await else { return };

        let sector = Sector::new(unique("Finance"));
        repo.create_sector(&sector).await.unwrap();
        let platform = Platform::new(unique("Slack"), License::Unlimited, PlatformStatus::Active);
        repo.create_platform(&platform, &[sector.id]).await.unwrap();

        let mut renamed = platform.clone();
        renamed.name = unique("Renamed");
        let result = repo
            .update_platform(&renamed, &[sector.id, SectorId::new()])
            .await;
        assert!(matches!(result, Err(LicensingError::UnknownReference)));

        let stored = repo.find_platform(platform.id).await.unwrap().unwrap();
        assert_eq!(stored.name, platform.name);
        assert_eq!(
            stored.sectors.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![sector.id]
        );

        repo.delete_platform(platform.id).await.unwrap();
        repo.delete_sector(sector.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_platform_replacement_keeps_previous_links() {
        let Some(repo) = database().await else { return };

        let platform = Platform::new(unique("Jira"), License::Unlimited, PlatformStatus::Active);
        repo.create_platform(&platform, &[]).await.unwrap();
        let email = Email::new(format!("{}@example.com", Uuid::new_v4().simple())).unwrap();
        let user = User::new(unique("Ana"), email, UserRole::User, UserStatus::Active);
        repo.create_user(&user, &[platform.id]).await.unwrap();

        let result = repo
            .update_user(&user, Some(&[PlatformId::new()]))
            .await;
        assert!(matches!(result, Err(LicensingError::UnknownReference)));

        let stored = repo.find_user(user.id).await.unwrap().unwrap();
        assert_eq!(
            stored.platforms.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![platform.id]
        );

        repo.delete_user(user.id).await.unwrap();
        repo.delete_platform(platform.id).await.unwrap();
    }
}
