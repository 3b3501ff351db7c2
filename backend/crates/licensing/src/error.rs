//! Licensing Error Types
//!
//! Licensing-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Licensing-specific result type alias
pub type LicensingResult<T> = Result<T, LicensingError>;

#[derive(Debug, Error)]
pub enum LicensingError {
    /// Malformed or missing input field
    #[error("{0}")]
    Validation(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Platform not found")]
    PlatformNotFound,

    #[error("Sector not found")]
    SectorNotFound,

    #[error("Email already in use")]
    EmailTaken,

    #[error("Sector name already in use")]
    SectorNameTaken,

    /// An association list names a platform or sector that does not exist
    #[error("Referenced platform or sector does not exist")]
    UnknownReference,

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LicensingError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LicensingError::Validation(_) | LicensingError::UnknownReference => {
                ErrorKind::BadRequest
            }
            LicensingError::UserNotFound
            | LicensingError::PlatformNotFound
            | LicensingError::SectorNotFound => ErrorKind::NotFound,
            LicensingError::EmailTaken | LicensingError::SectorNameTaken => ErrorKind::Conflict,
            LicensingError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => {
                ErrorKind::ServiceUnavailable
            }
            LicensingError::Database(_) | LicensingError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a fixed message; their details only reach the log.
    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            ErrorKind::InternalServerError => AppError::internal("Internal server error"),
            ErrorKind::ServiceUnavailable => AppError::service_unavailable("Database unavailable")
                .with_action("Please retry shortly"),
            kind => AppError::new(kind, self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            LicensingError::Database(e) => {
                tracing::error!(error = %e, "Licensing database error");
            }
            LicensingError::Internal(msg) => {
                tracing::error!(message = %msg, "Licensing internal error");
            }
            LicensingError::EmailTaken | LicensingError::SectorNameTaken => {
                tracing::info!(error = %self, "Uniqueness conflict");
            }
            _ => {
                tracing::debug!(error = %self, "Licensing error");
            }
        }
    }
}

impl IntoResponse for LicensingError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for LicensingError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // https://www.postgresql.org/docs/current/errcodes-appendix.html
            match (db_err.code().as_deref(), db_err.constraint()) {
                (Some("23503"), _) => return LicensingError::UnknownReference,
                (Some("23505"), Some("users_email_key")) => return LicensingError::EmailTaken,
                (Some("23505"), Some("sectors_name_key")) => {
                    return LicensingError::SectorNameTaken;
                }
                _ => {}
            }
        }
        LicensingError::Database(err)
    }
}

/// Value-object validation failures (`Email`, `RawPassword`) arrive as `AppError`
impl From<AppError> for LicensingError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            LicensingError::Internal(err.to_string())
        } else {
            LicensingError::Validation(err.message().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            LicensingError::Validation("Name is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(LicensingError::PlatformNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(LicensingError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(LicensingError::UnknownReference.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            LicensingError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = LicensingError::Internal("invalid license_type: 9".into());
        assert_eq!(err.to_app_error().message(), "Internal server error");

        let err = LicensingError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.to_app_error().message(), "Internal server error");
    }

    #[test]
    fn test_value_object_rejection_becomes_validation() {
        let err: LicensingError = AppError::bad_request("Invalid email format").into();
        assert!(matches!(err, LicensingError::Validation(ref m) if m == "Invalid email format"));

        let err: LicensingError = AppError::internal("Password hashing failed").into();
        assert!(matches!(err, LicensingError::Internal(_)));
    }
}
