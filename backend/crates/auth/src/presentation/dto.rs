//! API DTOs (Data Transfer Objects)

use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user_credential::UserCredential;
use crate::domain::value_object::user_role::UserRole;

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

/// Public profile returned with a fresh token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<UserCredential> for LoginUser {
    fn from(user: UserCredential) -> Self {
        Self {
            id: user.user_id,
            name: user.name,
            email: user.email.into(),
            role: user.role,
        }
    }
}
