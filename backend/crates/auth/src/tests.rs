//! Unit tests for Auth crate

#[cfg(test)]
mod fixtures {
    use std::sync::{Arc, Mutex};

    use kernel::id::UserId;

    use crate::application::config::AuthConfig;
    use crate::domain::entity::user_credential::UserCredential;
    use crate::domain::repository::CredentialRepository;
    use crate::domain::value_object::{
        email::Email,
        user_password::{RawPassword, UserPassword},
        user_role::UserRole,
        user_status::UserStatus,
    };
    use crate::error::AuthResult;

    /// In-memory credential store
    #[derive(Clone, Default)]
    pub struct InMemoryCredentials {
        users: Arc<Mutex<Vec<UserCredential>>>,
    }

    impl InMemoryCredentials {
        pub fn insert(&self, user: UserCredential) {
            self.users.lock().unwrap().push(user);
        }
    }

    impl CredentialRepository for InMemoryCredentials {
        async fn find_by_email(&self, email: &Email) -> AuthResult<Option<UserCredential>> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| &u.email == email).cloned())
        }
    }

    pub fn config() -> AuthConfig {
        AuthConfig::with_secret(b"test-secret-0123456789abcdef".to_vec())
    }

    pub fn credential(
        email: &str,
        password: Option<&str>,
        role: UserRole,
        status: UserStatus,
    ) -> UserCredential {
        let password = password.map(|p| {
            let raw = RawPassword::new(p.to_string()).unwrap();
            UserPassword::from_raw(&raw, None).unwrap()
        });

        UserCredential {
            user_id: UserId::new(),
            name: "Test User".to_string(),
            email: Email::new(email).unwrap(),
            role,
            status,
            password,
        }
    }

    /// Store holding the bootstrap admin `test@example.com` / `password123`
    pub fn seeded() -> (InMemoryCredentials, UserCredential) {
        let repo = InMemoryCredentials::default();
        let admin = credential(
            "test@example.com",
            Some("password123"),
            UserRole::Admin,
            UserStatus::Active,
        );
        repo.insert(admin.clone());
        (repo, admin)
    }
}

#[cfg(test)]
mod sign_in_tests {
    use std::sync::Arc;

    use super::fixtures::*;
    use crate::application::{SignInInput, SignInUseCase, VerifyTokenUseCase};
    use crate::domain::value_object::{user_role::UserRole, user_status::UserStatus};
    use crate::error::AuthError;

    fn input(email: Option<&str>, password: Option<&str>) -> SignInInput {
        SignInInput {
            email: email.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_seeded_admin_signs_in() {
        let (repo, admin) = seeded();
        let config = Arc::new(config());
        let use_case = SignInUseCase::new(Arc::new(repo), config.clone());

        let output = use_case
            .execute(input(Some("test@example.com"), Some("password123")))
            .await
            .unwrap();

        assert_eq!(output.user.user_id, admin.user_id);

        let principal = VerifyTokenUseCase::new(config).execute(&output.token).unwrap();
        assert_eq!(principal.user_id, admin.user_id);
        assert_eq!(principal.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_email_is_trimmed_before_lookup() {
        let (repo, _) = seeded();
        let use_case = SignInUseCase::new(Arc::new(repo), Arc::new(config()));

        let result = use_case
            .execute(input(Some("  test@example.com "), Some("password123")))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let (repo, _) = seeded();
        let use_case = SignInUseCase::new(Arc::new(repo), Arc::new(config()));

        let result = use_case
            .execute(input(Some("test@example.com"), Some("wrong")))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let (repo, _) = seeded();
        let use_case = SignInUseCase::new(Arc::new(repo), Arc::new(config()));

        let result = use_case
            .execute(input(Some("nobody@example.com"), Some("password123")))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_user_without_password_cannot_sign_in() {
        let repo = InMemoryCredentials::default();
        repo.insert(credential(
            "nopass@example.com",
            None,
            UserRole::User,
            UserStatus::Active,
        ));
        let use_case = SignInUseCase::new(Arc::new(repo), Arc::new(config()));

        let result = use_case
            .execute(input(Some("nopass@example.com"), Some("anything")))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_inactive_user_is_rejected_after_password_check() {
        let repo = InMemoryCredentials::default();
        repo.insert(credential(
            "gone@example.com",
            Some("password123"),
            UserRole::User,
            UserStatus::Inactive,
        ));
        let use_case = SignInUseCase::new(Arc::new(repo), Arc::new(config()));

        let right = use_case
            .execute(input(Some("gone@example.com"), Some("password123")))
            .await;
        assert!(matches!(right, Err(AuthError::AccountInactive)));

        let wrong = use_case
            .execute(input(Some("gone@example.com"), Some("nope")))
            .await;
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let (repo, _) = seeded();
        let use_case = SignInUseCase::new(Arc::new(repo), Arc::new(config()));

        for (email, password) in [
            (None, Some("password123")),
            (Some("test@example.com"), None),
            (Some("   "), Some("password123")),
            (Some("test@example.com"), Some("")),
        ] {
            let result = use_case.execute(input(email, password)).await;
            assert!(matches!(result, Err(AuthError::MissingCredentials)));
        }
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::fixtures::*;
    use crate::presentation::router::auth_router_generic;

    async fn post_login(body: Value) -> (StatusCode, Value) {
        let (repo, _) = seeded();
        let app = auth_router_generic(repo, Arc::new(config()));

        let response = app
            .oneshot(
                Request::post("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_login_success_shape() {
        let (status, body) =
            post_login(json!({"email": "test@example.com", "password": "password123"})).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(body["user"]["email"], "test@example.com");
        assert_eq!(body["user"]["role"], "ADMIN");
        assert!(body["user"].get("password").is_none());
        assert!(body["user"].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (status, body) =
            post_login(json!({"email": "test@example.com", "password": "nope"})).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_login_missing_password() {
        let (status, body) = post_login(json!({"email": "test@example.com"})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Email and password are required");
    }
}

#[cfg(test)]
mod middleware_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use chrono::{Duration, Utc};
    use kernel::id::UserId;
    use tower::ServiceExt;

    use super::fixtures::config;
    use crate::application::config::AuthConfig;
    use crate::domain::entity::principal::{AllowedRoles, Principal};
    use crate::domain::value_object::{access_claims::AccessClaims, user_role::UserRole};
    use crate::presentation::middleware::{AccessGuard, authenticate, authorize};

    fn app(config: Arc<AuthConfig>) -> Router {
        let admin_only = Router::new()
            .route("/admin", get(|| async { "admin" }))
            .route_layer(from_fn_with_state(AllowedRoles::admin(), authorize));

        Router::new()
            .route(
                "/me",
                get(|principal: Principal| async move { principal.user_id.to_string() }),
            )
            .merge(admin_only)
            .route_layer(from_fn_with_state(AccessGuard::new(config), authenticate))
    }

    fn token(config: &AuthConfig, user_id: UserId, role: UserRole, issued_ago: Duration) -> String {
        let claims = AccessClaims::new(user_id, role, Utc::now() - issued_ago, config.token_ttl);
        config.token_signer().sign(&claims).unwrap()
    }

    async fn get_with(app: Router, uri: &str, bearer: Option<&str>) -> (StatusCode, String) {
        let mut request = Request::get(uri);
        if let Some(token) = bearer {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let response = app.oneshot(request.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let config = Arc::new(config());
        let (status, _) = get_with(app(config), "/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let config = Arc::new(config());
        let (status, _) = get_with(app(config), "/me", Some("abc.def.ghi")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let config = Arc::new(config());
        let expired = token(&config, UserId::new(), UserRole::Admin, Duration::days(2));
        let (status, body) = get_with(app(config), "/me", Some(expired.as_str())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("expired"));
    }

    #[tokio::test]
    async fn test_token_from_other_secret_is_unauthorized() {
        let other = AuthConfig::with_secret(b"another-secret".to_vec());
        let forged = token(&other, UserId::new(), UserRole::Admin, Duration::zero());
        let (status, _) = get_with(app(Arc::new(config())), "/me", Some(forged.as_str())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_principal_is_available_to_handlers() {
        let config = Arc::new(config());
        let user_id = UserId::new();
        let valid = token(&config, user_id, UserRole::User, Duration::zero());
        let (status, body) = get_with(app(config), "/me", Some(valid.as_str())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, user_id.to_string());
    }

    #[tokio::test]
    async fn test_role_gate() {
        let config = Arc::new(config());

        let user = token(&config, UserId::new(), UserRole::User, Duration::zero());
        let (status, _) = get_with(app(config.clone()), "/admin", Some(user.as_str())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let admin = token(&config, UserId::new(), UserRole::Admin, Duration::zero());
        let (status, body) = get_with(app(config), "/admin", Some(admin.as_str())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "admin");
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::MissingCredentials, StatusCode::BAD_REQUEST),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::AccountInactive, StatusCode::FORBIDDEN),
            (AuthError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AuthError::TokenExpired, StatusCode::UNAUTHORIZED),
            (AuthError::Forbidden, StatusCode::FORBIDDEN),
            (
                AuthError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            assert_eq!(error.into_response().status(), expected_status);
        }
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let err = AuthError::Internal("connection string postgres://secret".into());
        assert_eq!(err.to_app_error().message(), "Internal server error");
    }

    #[test]
    fn test_token_error_mapping() {
        use platform::token::TokenError;
        assert!(matches!(AuthError::from(TokenError::Expired), AuthError::TokenExpired));
        assert!(matches!(AuthError::from(TokenError::Invalid), AuthError::Unauthorized));
    }
}
