//! Value Objects

pub mod license;
pub mod platform_status;
