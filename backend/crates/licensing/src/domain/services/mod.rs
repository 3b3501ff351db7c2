//! Domain Services
//!
//! Pure functions over loaded entities; no I/O.

pub mod export;
pub mod expiry;
pub mod sector_catalog;
