//! Verify Token Use Case
//!
//! Turns a bearer token into a [`Principal`]. Purely cryptographic: the
//! signature and expiry are checked, the database is not consulted.

use std::sync::Arc;

use platform::token::TokenSigner;

use crate::application::config::AuthConfig;
use crate::domain::entity::principal::Principal;
use crate::domain::value_object::access_claims::AccessClaims;
use crate::error::AuthResult;

#[derive(Debug, Clone)]
pub struct VerifyTokenUseCase {
    signer: TokenSigner,
}

impl VerifyTokenUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self {
            signer: config.token_signer(),
        }
    }

    pub fn execute(&self, token: &str) -> AuthResult<Principal> {
        let claims: AccessClaims = self.signer.verify(token)?;
        Ok(claims.principal())
    }
}
