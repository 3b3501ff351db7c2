//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by the `auth` and `licensing` crates:
//! - The unified [`error::app_error::AppError`] and its HTTP mapping
//! - Typed UUID identifiers for users, platforms and sectors
//! - Request extractors that turn malformed input into `400 Bad Request`
//!
//! Only things with the same meaning in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;

#[cfg(feature = "axum")]
pub mod extract;
