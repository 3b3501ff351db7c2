//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Credentials, principals, claims, repository trait
//! - `application/` - Sign-in and token verification use cases
//! - `infra/` - Database implementation
//! - `presentation/` - Login handler, DTOs, router, access-guard middleware
//!
//! ## Features
//! - Email + password login issuing a signed bearer token (HS256, 1 day)
//! - Stateless verification of the bearer token on every request
//! - Role gating (`ADMIN`, `USER`) composable per route
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Unknown email, missing hash and wrong password are indistinguishable
//! - No server-side session state

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::entity::principal::{AllowedRoles, Principal};
pub use domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
    user_status::UserStatus,
};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::{AccessGuard, authenticate, authorize};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
