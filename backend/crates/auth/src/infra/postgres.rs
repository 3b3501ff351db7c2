//! PostgreSQL Repository Implementation

use sqlx::PgPool;
use uuid::Uuid;

use kernel::id::UserId;

use crate::domain::entity::user_credential::UserCredential;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{
    email::Email, user_password::UserPassword, user_role::UserRole, user_status::UserStatus,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed credential repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CredentialRepository for PgAuthRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<UserCredential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                user_id,
                name,
                email,
                password_hash,
                user_role,
                user_status
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CredentialRow::into_credential).transpose()
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CredentialRow {
    user_id: Uuid,
    name: String,
    email: String,
    password_hash: Option<String>,
    user_role: i16,
    user_status: i16,
}

impl CredentialRow {
    fn into_credential(self) -> AuthResult<UserCredential> {
        let role = UserRole::from_id(self.user_role).ok_or_else(|| {
            AuthError::Internal(format!("Invalid user_role: {}", self.user_role))
        })?;
        let status = UserStatus::from_id(self.user_status).ok_or_else(|| {
            AuthError::Internal(format!("Invalid user_status: {}", self.user_status))
        })?;

        let password = self
            .password_hash
            .map(UserPassword::from_phc_string)
            .transpose()
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(UserCredential {
            user_id: UserId::from_uuid(self.user_id),
            name: self.name,
            email: Email::from_db(self.email),
            role,
            status,
            password,
        })
    }
}
