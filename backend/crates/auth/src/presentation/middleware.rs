//! Access Guard Middleware
//!
//! Two layers, applied with `axum::middleware::from_fn_with_state`:
//! - [`authenticate`] verifies the bearer token and stores the [`Principal`]
//!   in request extensions (401 otherwise)
//! - [`authorize`] checks the stored principal against an [`AllowedRoles`]
//!   set (403 otherwise)
//!
//! ```ignore
//! Router::new()
//!     .route("/users", get(list_users))
//!     .route_layer(from_fn_with_state(AllowedRoles::admin(), authorize))
//!     .route_layer(from_fn_with_state(guard, authenticate))
//! ```

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer_token;
use std::sync::Arc;

use crate::application::VerifyTokenUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::principal::{AllowedRoles, Principal};
use crate::error::AuthError;

/// State for [`authenticate`]
#[derive(Debug, Clone)]
pub struct AccessGuard {
    verifier: VerifyTokenUseCase,
}

impl AccessGuard {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self {
            verifier: VerifyTokenUseCase::new(config),
        }
    }
}

/// Require a valid bearer token
pub async fn authenticate(
    State(guard): State<AccessGuard>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer_token(req.headers()).ok_or(AuthError::Unauthorized)?;
    let principal = guard.verifier.execute(token)?;

    tracing::debug!(user_id = %principal.user_id, role = %principal.role, "Request authenticated");

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Require the authenticated principal to hold one of the allowed roles
pub async fn authorize(
    State(allowed): State<AllowedRoles>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let principal = req
        .extensions()
        .get::<Principal>()
        .copied()
        .ok_or(AuthError::Unauthorized)?;

    principal.authorize(&allowed)?;

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .ok_or(AuthError::Unauthorized)
    }
}
