//! Access Token Claims
//!
//! Payload of the signed bearer token: subject (user id), role, and
//! issue/expiry instants in Unix seconds.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use super::user_role::UserRole;
use crate::domain::entity::principal::Principal;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: UserId,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

impl AccessClaims {
    pub fn new(user_id: UserId, role: UserRole, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: user_id,
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.sub,
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_is_issue_plus_ttl() {
        let now = Utc::now();
        let claims = AccessClaims::new(UserId::new(), UserRole::Admin, now, Duration::days(1));
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn test_wire_shape() {
        let id = UserId::new();
        let claims = AccessClaims::new(id, UserRole::User, Utc::now(), Duration::hours(1));
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["sub"], id.to_string());
        assert_eq!(json["role"], "USER");
    }
}
