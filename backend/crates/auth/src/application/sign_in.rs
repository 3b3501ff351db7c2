//! Sign In Use Case
//!
//! Verifies an email/password pair and issues a signed access token.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user_credential::UserCredential;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{
    access_claims::AccessClaims, email::Email, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
///
/// Fields are optional so that an absent field is reported as
/// `MissingCredentials` rather than a body parse error.
pub struct SignInInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Sign in output
pub struct SignInOutput {
    /// Signed bearer token
    pub token: String,
    /// The authenticated user
    pub user: UserCredential,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let email = input
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty());
        let password = input.password.filter(|p| !p.is_empty());

        let (Some(email), Some(password)) = (email, password) else {
            return Err(AuthError::MissingCredentials);
        };

        // A malformed address cannot belong to any account
        let email = Email::new(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let stored = user
            .password
            .as_ref()
            .ok_or(AuthError::InvalidCredentials)?;

        let attempt = RawPassword::for_verification(password);
        if !stored.verify(&attempt, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        // Status is only consulted once the password has matched
        if !user.can_login() {
            return Err(AuthError::AccountInactive);
        }

        let claims = AccessClaims::new(user.user_id, user.role, Utc::now(), self.config.token_ttl);
        let token = self.config.token_signer().sign(&claims)?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.role,
            "User signed in"
        );

        Ok(SignInOutput { token, user })
    }
}
