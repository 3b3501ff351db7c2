//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use kernel::extract::ValidJson;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{SignInInput, SignInUseCase};
use crate::domain::repository::CredentialRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{LoginRequest, LoginResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        user: output.user.into(),
    }))
}
