//! Export Use Cases
//!
//! Comma-separated snapshots of all users and all platforms, with
//! pt-BR column headers.

use std::sync::Arc;

use crate::domain::entity::{platform::Platform, user::User};
use crate::domain::repository::{PlatformFilter, PlatformRepository, UserRepository};
use crate::domain::services::export::{
    ExportRecord, ExportValue, RelatedName, flatten, to_delimited_text,
};
use crate::error::LicensingResult;

pub struct ExportUsersUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ExportUsersUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> LicensingResult<String> {
        let users = self.repo.list_users(true).await?;
        let rows: Vec<_> = users.iter().map(|u| flatten(&user_record(u))).collect();

        tracing::info!(rows = rows.len(), "Users exported");
        Ok(to_delimited_text(&rows))
    }
}

fn user_record(user: &User) -> ExportRecord {
    vec![
        ("ID", ExportValue::text(user.id.to_string())),
        ("Nome", ExportValue::text(&user.name)),
        ("Email", ExportValue::text(user.email.as_str())),
        ("Função", ExportValue::text(user.role.code())),
        ("Setor", ExportValue::optional_text(user.sector.as_deref())),
        ("Cargo", ExportValue::optional_text(user.position.as_deref())),
        ("Status", ExportValue::text(user.status.code())),
        (
            "Plataformas",
            ExportValue::Related(
                user.platforms
                    .iter()
                    .map(|p| RelatedName::new(p.id, &p.name))
                    .collect(),
            ),
        ),
        ("Data de Criação", ExportValue::Date(user.created_at)),
        ("Última Atualização", ExportValue::Date(user.updated_at)),
    ]
}

pub struct ExportPlatformsUseCase<R>
where
    R: PlatformRepository,
{
    repo: Arc<R>,
}

impl<R> ExportPlatformsUseCase<R>
where
    R: PlatformRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> LicensingResult<String> {
        let platforms = self.repo.list_platforms(&PlatformFilter::default()).await?;
        let rows: Vec<_> = platforms
            .iter()
            .map(|p| flatten(&platform_record(p)))
            .collect();

        tracing::info!(rows = rows.len(), "Platforms exported");
        Ok(to_delimited_text(&rows))
    }
}

fn platform_record(platform: &Platform) -> ExportRecord {
    let quantity = platform
        .license
        .quantity()
        .map_or(ExportValue::text("N/A"), |q| ExportValue::Number(q.into()));

    vec![
        ("ID", ExportValue::text(platform.id.to_string())),
        ("Nome", ExportValue::text(&platform.name)),
        (
            "Descrição",
            ExportValue::optional_text(platform.description.as_deref()),
        ),
        ("Tipo de Licença", ExportValue::text(platform.license.kind().code())),
        ("Quantidade de Licenças", quantity),
        (
            "Data de Expiração",
            ExportValue::optional_date(platform.expiration_date),
        ),
        ("Status", ExportValue::text(platform.status.code())),
        (
            "Setores",
            ExportValue::Related(
                platform
                    .sectors
                    .iter()
                    .map(|s| RelatedName::new(s.id, &s.name))
                    .collect(),
            ),
        ),
        (
            "Usuários",
            ExportValue::Related(
                platform
                    .users
                    .iter()
                    .map(|u| RelatedName::new(u.id, &u.name))
                    .collect(),
            ),
        ),
        ("Data de Criação", ExportValue::Date(platform.created_at)),
        ("Última Atualização", ExportValue::Date(platform.updated_at)),
    ]
}
