//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password missing from the login request
    #[error("Email and password are required")]
    MissingCredentials,

    /// Unknown email, no stored hash, or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Credentials are correct but the account is not ACTIVE
    #[error("User is inactive")]
    AccountInactive,

    /// Bearer token missing or not verifiable
    #[error("Authentication required")]
    Unauthorized,

    /// Bearer token verified but past its expiry
    #[error("Token has expired")]
    TokenExpired,

    /// Authenticated principal lacks the required role
    #[error("Insufficient permissions")]
    Forbidden,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::Unauthorized | AuthError::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::AccountInactive | AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingCredentials => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::Unauthorized | AuthError::TokenExpired => {
                ErrorKind::Unauthorized
            }
            AuthError::AccountInactive | AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a fixed message; their details only reach the log.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            AuthError::TokenExpired => {
                AppError::unauthorized(self.to_string()).with_action("Please sign in again")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountInactive => {
                tracing::warn!("Login attempt on inactive account");
            }
            AuthError::Forbidden => {
                tracing::info!("Request rejected by role check");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::Invalid => AuthError::Unauthorized,
            TokenError::Signing(msg) => AuthError::Internal(msg),
        }
    }
}
