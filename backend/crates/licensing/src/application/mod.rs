//! Application Layer
//!
//! Use cases per resource. Handlers build one per request from the shared
//! repository and configuration.

pub mod admin;
pub mod config;
pub mod export;
mod input;
pub mod platforms;
pub mod sectors;
pub mod seed;
pub mod users;

pub use admin::{ExpiringPlatformsUseCase, ToggleAdminUseCase};
pub use config::LicensingConfig;
pub use export::{ExportPlatformsUseCase, ExportUsersUseCase};
pub use platforms::{
    CreatePlatformUseCase, DeletePlatformUseCase, ListPlatformsInput, ListPlatformsUseCase,
    PlatformInput, UpdatePlatformUseCase,
};
pub use sectors::{CreateSectorUseCase, DeleteSectorUseCase, ListSectorsUseCase, UpdateSectorUseCase};
pub use seed::SeedUseCase;
pub use users::{
    CreateUserInput, CreateUserOutput, CreateUserUseCase, DeleteUserUseCase, ListUsersUseCase,
    UpdateUserInput, UpdateUserUseCase,
};
