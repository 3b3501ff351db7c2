//! Credential lookup backed by the `users` table

pub mod postgres;

pub use postgres::PgAuthRepository;
