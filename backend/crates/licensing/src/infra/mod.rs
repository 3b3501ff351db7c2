//! Infrastructure Layer
//!
//! PostgreSQL persistence for users, platforms, sectors and their links.

pub mod postgres;

pub use postgres::PgLicensingRepository;
