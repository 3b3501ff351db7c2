//! Licensing Router
//!
//! Every route requires a bearer token. Reads of platforms and sectors are
//! open to any principal; everything else is `ADMIN` only.

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{MethodRouter, get, patch, post, put};
use std::sync::Arc;

use auth::{AccessGuard, AllowedRoles, authenticate, authorize};

use crate::application::config::LicensingConfig;
use crate::domain::repository::LicensingStore;
use crate::infra::postgres::PgLicensingRepository;
use crate::presentation::handlers::{self, LicensingAppState};

/// Create the Licensing router with PostgreSQL repository
pub fn licensing_router(
    repo: PgLicensingRepository,
    config: Arc<LicensingConfig>,
    guard: AccessGuard,
) -> Router {
    licensing_router_generic(repo, config, guard)
}

/// Create a generic Licensing router for any repository implementation
pub fn licensing_router_generic<R>(
    repo: R,
    config: Arc<LicensingConfig>,
    guard: AccessGuard,
) -> Router
where
    R: LicensingStore,
{
    let state = LicensingAppState {
        repo: Arc::new(repo),
        config,
    };

    Router::new()
        // Users
        .route(
            "/users",
            admin_only(get(handlers::list_users::<R>).post(handlers::create_user::<R>)),
        )
        .route("/users/export", admin_only(get(handlers::export_users::<R>)))
        .route(
            "/users/{id}",
            admin_only(put(handlers::update_user::<R>).delete(handlers::delete_user::<R>)),
        )
        // Platforms
        .route(
            "/platforms",
            get(handlers::list_platforms::<R>)
                .merge(admin_only(post(handlers::create_platform::<R>))),
        )
        .route(
            "/platforms/export",
            admin_only(get(handlers::export_platforms::<R>)),
        )
        .route(
            "/platforms/{id}",
            admin_only(
                put(handlers::update_platform::<R>).delete(handlers::delete_platform::<R>),
            ),
        )
        // Sectors
        .route(
            "/sectors",
            get(handlers::list_sectors::<R>).merge(admin_only(post(handlers::create_sector::<R>))),
        )
        .route(
            "/sectors/{id}",
            admin_only(put(handlers::update_sector::<R>).delete(handlers::delete_sector::<R>)),
        )
        // Admin
        .route(
            "/admin/users/{id}/toggle-admin",
            admin_only(patch(handlers::toggle_admin::<R>)),
        )
        .route(
            "/admin/expiring-platforms",
            admin_only(get(handlers::expiring_platforms::<R>)),
        )
        .route_layer(from_fn_with_state(guard, authenticate))
        .with_state(state)
}

fn admin_only<S>(route: MethodRouter<S>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(from_fn_with_state(AllowedRoles::admin(), authorize))
}
