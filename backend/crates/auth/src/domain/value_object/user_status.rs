//! User Status
//!
//! Only `ACTIVE` accounts can sign in. `INACTIVE` accounts keep their data
//! and associations but are refused at login.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum UserStatus {
    #[default]
    Active = 0,
    Inactive = 1,
}

impl UserStatus {
    /// Get numeric ID for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// Get string code for serialization/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }

    /// Check if login is allowed
    #[inline]
    pub const fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Active),
            1 => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_can_login() {
        assert!(UserStatus::Active.can_login());
        assert!(!UserStatus::Inactive.can_login());
    }

    #[test]
    fn test_id_roundtrip_and_unknown() {
        assert_eq!(UserStatus::from_id(UserStatus::Inactive.id()), Some(UserStatus::Inactive));
        assert_eq!(UserStatus::from_id(9), None);
    }

    #[test]
    fn test_wire_format() {
        let status: UserStatus = serde_json::from_str("\"INACTIVE\"").unwrap();
        assert_eq!(status, UserStatus::Inactive);
    }
}
