//! Licensing Backend Module
//!
//! Administration of users, licensed platforms and organisational sectors.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, license value objects, repository traits, and the
//!   pure expiry / export / sector catalog services
//! - `application/` - Use cases per resource
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - Handlers, DTOs, router with role gating
//!
//! ## Associations
//! User <-> Platform and Platform <-> Sector are many-to-many. Writes that
//! carry an association list replace the whole set inside one transaction,
//! and deleting either side removes its join rows.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::LicensingConfig;
pub use domain::services::expiry::ExpiryWindow;
pub use error::{LicensingError, LicensingResult};
pub use infra::postgres::PgLicensingRepository;
pub use presentation::router::{licensing_router, licensing_router_generic};
