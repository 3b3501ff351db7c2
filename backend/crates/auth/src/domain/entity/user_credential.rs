//! User Credential Entity
//!
//! The slice of a user record that login needs. Profile data and platform
//! associations belong to the `licensing` crate.

use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email, user_password::UserPassword, user_role::UserRole, user_status::UserStatus,
};

#[derive(Debug, Clone)]
pub struct UserCredential {
    pub user_id: UserId,
    pub name: String,
    pub email: Email,
    pub role: UserRole,
    pub status: UserStatus,
    /// `None` for accounts created without a password; they cannot sign in
    pub password: Option<UserPassword>,
}

impl UserCredential {
    pub fn can_login(&self) -> bool {
        self.status.can_login()
    }
}
