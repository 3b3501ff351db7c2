//! Credentials, access claims and the authenticated principal

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::{principal::Principal, user_credential::UserCredential};
pub use repository::CredentialRepository;
