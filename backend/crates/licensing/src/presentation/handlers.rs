//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use kernel::extract::{ValidJson, ValidPath, ValidQuery};
use kernel::id::{PlatformId, SectorId, UserId};
use std::sync::Arc;

use auth::Principal;

use crate::application::config::LicensingConfig;
use crate::application::{
    CreatePlatformUseCase, CreateSectorUseCase, CreateUserUseCase, DeletePlatformUseCase,
    DeleteSectorUseCase, DeleteUserUseCase, ExpiringPlatformsUseCase, ExportPlatformsUseCase,
    ExportUsersUseCase, ListPlatformsInput, ListPlatformsUseCase, ListSectorsUseCase,
    ListUsersUseCase, PlatformInput, ToggleAdminUseCase, UpdatePlatformUseCase,
    UpdateSectorUseCase, UpdateUserUseCase,
};
use crate::domain::repository::{LicensingStore, PlatformFilter};
use crate::error::LicensingResult;
use crate::presentation::dto::{
    CreateUserRequest, CreateUserResponse, MessageResponse, PlatformQuery, PlatformRequest,
    PlatformResponse, SectorRequest, SectorResponse, UpdateUserRequest, UserListQuery,
    UserResponse,
};

/// Shared state for licensing handlers
#[derive(Clone)]
pub struct LicensingAppState<R>
where
    R: LicensingStore,
{
    pub repo: Arc<R>,
    pub config: Arc<LicensingConfig>,
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/users
pub async fn list_users<R>(
    State(state): State<LicensingAppState<R>>,
    ValidQuery(query): ValidQuery<UserListQuery>,
) -> LicensingResult<Json<Vec<UserResponse>>>
where
    R: LicensingStore,
{
    let with_platforms = query.platforms.as_deref() != Some("false");
    let users = ListUsersUseCase::new(state.repo.clone())
        .execute(with_platforms)
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /api/users
pub async fn create_user<R>(
    State(state): State<LicensingAppState<R>>,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> LicensingResult<(StatusCode, Json<CreateUserResponse>)>
where
    R: LicensingStore,
{
    let output = CreateUserUseCase::new(state.repo.clone(), state.config.clone())
        .execute(req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            user: output.user.into(),
            generated_password: output.generated_password,
        }),
    ))
}

/// PUT /api/users/{id}
pub async fn update_user<R>(
    State(state): State<LicensingAppState<R>>,
    ValidPath(id): ValidPath<UserId>,
    ValidJson(req): ValidJson<UpdateUserRequest>,
) -> LicensingResult<Json<UserResponse>>
where
    R: LicensingStore,
{
    let user = UpdateUserUseCase::new(state.repo.clone(), state.config.clone())
        .execute(id, req.into())
        .await?;

    Ok(Json(user.into()))
}

/// DELETE /api/users/{id}
pub async fn delete_user<R>(
    State(state): State<LicensingAppState<R>>,
    ValidPath(id): ValidPath<UserId>,
) -> LicensingResult<Json<MessageResponse>>
where
    R: LicensingStore,
{
    DeleteUserUseCase::new(state.repo.clone()).execute(id).await?;

    Ok(Json(MessageResponse {
        message: "User deleted successfully",
    }))
}

/// GET /api/users/export
pub async fn export_users<R>(State(state): State<LicensingAppState<R>>) -> LicensingResult<Response>
where
    R: LicensingStore,
{
    let text = ExportUsersUseCase::new(state.repo.clone()).execute().await?;
    Ok(csv_attachment("usuarios", text))
}

// ============================================================================
// Platforms
// ============================================================================

/// GET /api/platforms
pub async fn list_platforms<R>(
    State(state): State<LicensingAppState<R>>,
    ValidQuery(query): ValidQuery<PlatformQuery>,
) -> LicensingResult<Json<Vec<PlatformResponse>>>
where
    R: LicensingStore,
{
    let input = ListPlatformsInput {
        filter: PlatformFilter {
            sector_name: query.sector.filter(|s| !s.is_empty()),
            status: query.status,
        },
        expiring: query.expiring.as_deref() == Some("true"),
    };

    let platforms = ListPlatformsUseCase::new(state.repo.clone(), state.config.clone())
        .execute(input)
        .await?;

    Ok(Json(platforms.into_iter().map(PlatformResponse::from).collect()))
}

/// POST /api/platforms
pub async fn create_platform<R>(
    State(state): State<LicensingAppState<R>>,
    ValidJson(req): ValidJson<PlatformRequest>,
) -> LicensingResult<(StatusCode, Json<PlatformResponse>)>
where
    R: LicensingStore,
{
    let platform = CreatePlatformUseCase::new(state.repo.clone())
        .execute(PlatformInput::try_from(req)?)
        .await?;

    Ok((StatusCode::CREATED, Json(platform.into())))
}

/// PUT /api/platforms/{id}
pub async fn update_platform<R>(
    State(state): State<LicensingAppState<R>>,
    ValidPath(id): ValidPath<PlatformId>,
    ValidJson(req): ValidJson<PlatformRequest>,
) -> LicensingResult<Json<PlatformResponse>>
where
    R: LicensingStore,
{
    let platform = UpdatePlatformUseCase::new(state.repo.clone())
        .execute(id, PlatformInput::try_from(req)?)
        .await?;

    Ok(Json(platform.into()))
}

/// DELETE /api/platforms/{id}
pub async fn delete_platform<R>(
    State(state): State<LicensingAppState<R>>,
    ValidPath(id): ValidPath<PlatformId>,
) -> LicensingResult<Json<MessageResponse>>
where
    R: LicensingStore,
{
    DeletePlatformUseCase::new(state.repo.clone())
        .execute(id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Platform deleted successfully",
    }))
}

/// GET /api/platforms/export
pub async fn export_platforms<R>(
    State(state): State<LicensingAppState<R>>,
) -> LicensingResult<Response>
where
    R: LicensingStore,
{
    let text = ExportPlatformsUseCase::new(state.repo.clone())
        .execute()
        .await?;
    Ok(csv_attachment("plataformas", text))
}

// ============================================================================
// Sectors
// ============================================================================

/// GET /api/sectors
pub async fn list_sectors<R>(
    State(state): State<LicensingAppState<R>>,
) -> LicensingResult<Json<Vec<SectorResponse>>>
where
    R: LicensingStore,
{
    let sectors = ListSectorsUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(sectors.into_iter().map(SectorResponse::from).collect()))
}

/// POST /api/sectors
pub async fn create_sector<R>(
    State(state): State<LicensingAppState<R>>,
    ValidJson(req): ValidJson<SectorRequest>,
) -> LicensingResult<(StatusCode, Json<SectorResponse>)>
where
    R: LicensingStore,
{
    let sector = CreateSectorUseCase::new(state.repo.clone())
        .execute(&req.name)
        .await?;

    Ok((StatusCode::CREATED, Json(sector.into())))
}

/// PUT /api/sectors/{id}
pub async fn update_sector<R>(
    State(state): State<LicensingAppState<R>>,
    ValidPath(id): ValidPath<SectorId>,
    ValidJson(req): ValidJson<SectorRequest>,
) -> LicensingResult<Json<SectorResponse>>
where
    R: LicensingStore,
{
    let sector = UpdateSectorUseCase::new(state.repo.clone())
        .execute(id, &req.name)
        .await?;

    Ok(Json(sector.into()))
}

/// DELETE /api/sectors/{id}
pub async fn delete_sector<R>(
    State(state): State<LicensingAppState<R>>,
    ValidPath(id): ValidPath<SectorId>,
) -> LicensingResult<StatusCode>
where
    R: LicensingStore,
{
    DeleteSectorUseCase::new(state.repo.clone())
        .execute(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Admin
// ============================================================================

/// PATCH /api/admin/users/{id}/toggle-admin
pub async fn toggle_admin<R>(
    State(state): State<LicensingAppState<R>>,
    actor: Principal,
    ValidPath(id): ValidPath<UserId>,
) -> LicensingResult<Json<UserResponse>>
where
    R: LicensingStore,
{
    let user = ToggleAdminUseCase::new(state.repo.clone())
        .execute(id)
        .await?;

    tracing::info!(actor = %actor.user_id, user_id = %id, role = %user.role, "Admin role toggled");

    Ok(Json(user.into()))
}

/// GET /api/admin/expiring-platforms
pub async fn expiring_platforms<R>(
    State(state): State<LicensingAppState<R>>,
) -> LicensingResult<Json<Vec<PlatformResponse>>>
where
    R: LicensingStore,
{
    let platforms = ExpiringPlatformsUseCase::new(state.repo.clone(), state.config.clone())
        .execute()
        .await?;

    Ok(Json(platforms.into_iter().map(PlatformResponse::from).collect()))
}

/// `text/csv` download named `<prefix>_YYYY-MM-DD.csv`
fn csv_attachment(prefix: &str, body: String) -> Response {
    let filename = format!("{}_{}.csv", prefix, Utc::now().format("%Y-%m-%d"));

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
            (
                header::CACHE_CONTROL,
                "no-cache, no-store, must-revalidate".to_string(),
            ),
            (header::PRAGMA, "no-cache".to_string()),
            (header::EXPIRES, "0".to_string()),
        ],
        body,
    )
        .into_response()
}
