//! Domain Entities

pub mod platform;
pub mod related;
pub mod sector;
pub mod user;
