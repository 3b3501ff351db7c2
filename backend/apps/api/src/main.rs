//! API Server Entry Point
//!
//! Loads configuration, prepares the database and serves the auth and
//! licensing routers. Start-up failures surface as `anyhow` errors.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::{AccessGuard, PgAuthRepository, auth_router};
use axum::{
    Router,
    http::{Method, header},
    routing::get,
};
use licensing::{PgLicensingRepository, application::SeedUseCase, licensing_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,licensing=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server = ServerConfig::from_env()?;
    tracing::debug!(config = ?server, "Configuration loaded");

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&server.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_config = Arc::new(server.auth_config());
    let licensing_config = Arc::new(server.licensing_config());
    let licensing_repo = PgLicensingRepository::new(pool.clone());

    // Startup seeding
    // Errors here should not prevent server startup
    let seed = SeedUseCase::new(Arc::new(licensing_repo.clone()), licensing_config.clone());
    if let Err(e) = seed.seed_sectors().await {
        tracing::warn!(error = %e, "Sector seeding failed, continuing anyway");
    }
    if let Some((email, password)) = &server.seed_admin {
        if let Err(e) = seed.ensure_admin(email, password.clone()).await {
            tracing::warn!(error = %e, "Bootstrap admin seeding failed, continuing anyway");
        }
    }

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(server.frontend_origins.clone())
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .expose_headers([header::CONTENT_DISPOSITION]);

    // Build router
    let guard = AccessGuard::new(auth_config.clone());
    let app = Router::new()
        .route("/", get(|| async { "Platform Management System API" }))
        .nest(
            "/api/auth",
            auth_router(PgAuthRepository::new(pool.clone()), auth_config),
        )
        .nest(
            "/api",
            licensing_router(licensing_repo, licensing_config, guard),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], server.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
