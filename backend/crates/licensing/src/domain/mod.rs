//! Domain Layer
//!
//! Entities, value objects, repository traits and pure services.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

pub use entity::{
    platform::Platform,
    related::{PlatformRef, SectorRef, UserRef},
    sector::Sector,
    user::User,
};
pub use repository::{
    LicensingStore, PlatformFilter, PlatformRepository, SectorRepository, UserRepository,
};
pub use value_object::{
    license::{License, LicenseType},
    platform_status::PlatformStatus,
};
