//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user_credential::UserCredential;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Credential lookup used by sign-in
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Find the credential record for an email address
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<UserCredential>>;
}
