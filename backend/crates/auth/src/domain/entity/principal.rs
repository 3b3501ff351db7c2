//! Principal Entity
//!
//! The authenticated identity attached to a request after its bearer token
//! has been verified.

use kernel::id::UserId;

use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub role: UserRole,
}

impl Principal {
    /// Fails with [`AuthError::Forbidden`] when the role is not allowed
    pub fn authorize(&self, allowed: &AllowedRoles) -> AuthResult<()> {
        if allowed.permits(self.role) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

/// Role set accepted by a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedRoles(Option<Vec<UserRole>>);

impl AllowedRoles {
    /// Any authenticated principal
    pub fn any() -> Self {
        Self(None)
    }

    pub fn only(roles: impl IntoIterator<Item = UserRole>) -> Self {
        Self(Some(roles.into_iter().collect()))
    }

    pub fn admin() -> Self {
        Self::only([UserRole::Admin])
    }

    pub fn permits(&self, role: UserRole) -> bool {
        match &self.0 {
            None => true,
            Some(roles) => roles.contains(&role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: UserRole) -> Principal {
        Principal {
            user_id: UserId::new(),
            role,
        }
    }

    #[test]
    fn test_any_permits_every_role() {
        let any = AllowedRoles::any();
        assert!(principal(UserRole::User).authorize(&any).is_ok());
        assert!(principal(UserRole::Admin).authorize(&any).is_ok());
    }

    #[test]
    fn test_admin_only() {
        let admin = AllowedRoles::admin();
        assert!(principal(UserRole::Admin).authorize(&admin).is_ok());
        assert!(matches!(
            principal(UserRole::User).authorize(&admin),
            Err(AuthError::Forbidden)
        ));
    }

    #[test]
    fn test_empty_set_rejects_everyone() {
        let none = AllowedRoles::only([]);
        assert!(principal(UserRole::Admin).authorize(&none).is_err());
    }
}
