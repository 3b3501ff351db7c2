//! Error conversions - From implementations for foreign error types
//!
//! Provides automatic conversion into [`AppError`] and the HTTP response
//! rendering of [`AppError`].

use super::app_error::AppError;
#[cfg(any(test, feature = "axum"))]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable("Database connection pool exhausted").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let app_err = match db_err.code().as_deref() {
                    // Class 23: Integrity Constraint Violation
                    Some("23502") => AppError::bad_request("Required field is missing"),
                    Some("23503") => AppError::bad_request("Referenced record does not exist"),
                    Some("23505") => AppError::conflict("Record already exists"),
                    Some("23514") => AppError::bad_request("Check constraint violation"),
                    // Class 53: Insufficient Resources
                    Some("53000" | "53100" | "53200" | "53300") => {
                        AppError::service_unavailable("Database resource exhausted")
                    }
                    // Class 57: Operator Intervention
                    Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                        AppError::service_unavailable("Database unavailable")
                    }
                    _ => AppError::internal("Database error"),
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database connection error").with_source(err)
            }
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
mod http_impls {
    use super::{AppError, ErrorKind};
    use axum::Json;
    use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde::Serialize;

    /// JSON エラーボディ `{ message, kind, action? }`
    #[derive(Serialize)]
    struct ErrorBody<'a> {
        message: &'a str,
        kind: ErrorKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        action: Option<&'a str>,
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

            let body = ErrorBody {
                message: self.message(),
                kind: self.kind(),
                action: self.action(),
            };

            (status, Json(body)).into_response()
        }
    }

    impl From<JsonRejection> for AppError {
        fn from(rejection: JsonRejection) -> Self {
            AppError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
        }
    }

    impl From<PathRejection> for AppError {
        fn from(rejection: PathRejection) -> Self {
            AppError::bad_request(format!("Invalid path parameter: {}", rejection.body_text()))
        }
    }

    impl From<QueryRejection> for AppError {
        fn from(rejection: QueryRejection) -> Self {
            AppError::bad_request(format!("Invalid query string: {}", rejection.body_text()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_preserved() {
        let err = AppError::conflict("Email already in use");
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_into_response_body() {
        use axum::response::IntoResponse;

        let response = AppError::not_found("Sector not found")
            .with_action("Reload the list")
            .into_response();
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["message"], "Sector not found");
        assert_eq!(json["kind"], "NOT_FOUND");
        assert_eq!(json["action"], "Reload the list");
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_action_is_omitted_when_absent() {
        use axum::response::IntoResponse;

        let response = AppError::internal("Database error").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json.get("action").is_none());
    }
}
