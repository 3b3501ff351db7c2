//! API DTOs (Data Transfer Objects)
//!
//! No response type carries a password or password hash.

use auth::{UserRole, UserStatus};
use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{PlatformId, SectorId, UserId};
use serde::{Deserialize, Serialize};

use crate::application::{CreateUserInput, PlatformInput, UpdateUserInput};
use crate::domain::entity::{
    platform::Platform,
    related::{PlatformRef, SectorRef, UserRef},
    sector::Sector,
    user::User,
};
use crate::domain::value_object::{license::LicenseType, platform_status::PlatformStatus};
use crate::error::{LicensingError, LicensingResult};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub generate_password: bool,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub status: Option<UserStatus>,
    /// Platform ids
    #[serde(default)]
    pub platforms: Vec<PlatformId>,
}

impl From<CreateUserRequest> for CreateUserInput {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            generate_password: req.generate_password,
            role: req.role,
            sector: req.sector,
            position: req.position,
            status: req.status,
            platform_ids: req.platforms,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub status: Option<UserStatus>,
    /// Present: replaces the platform set. Absent: links untouched.
    #[serde(default)]
    pub platforms: Option<Vec<PlatformId>>,
}

impl From<UpdateUserRequest> for UpdateUserInput {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
            sector: req.sector,
            position: req.position,
            status: req.status,
            platform_ids: req.platforms,
        }
    }
}

/// Body of both `POST /platforms` and `PUT /platforms/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to `UNLIMITED`
    #[serde(default)]
    pub license_type: Option<LicenseType>,
    #[serde(default)]
    pub license_quantity: Option<i64>,
    /// RFC 3339 instant or `YYYY-MM-DD`; blank clears the date
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub status: Option<PlatformStatus>,
    /// Sector ids; absent means none
    #[serde(default)]
    pub sectors: Vec<SectorId>,
}

impl TryFrom<PlatformRequest> for PlatformInput {
    type Error = LicensingError;

    fn try_from(req: PlatformRequest) -> LicensingResult<Self> {
        Ok(Self {
            name: req.name,
            description: req.description,
            license_type: req.license_type.unwrap_or(LicenseType::Unlimited),
            license_quantity: req.license_quantity,
            expiration_date: parse_expiration(req.expiration_date.as_deref())?,
            status: req.status,
            sector_ids: req.sectors,
        })
    }
}

fn parse_expiration(value: Option<&str>) -> LicensingResult<Option<DateTime<Utc>>> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(instant.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Some(midnight.and_utc()))
        .ok_or_else(|| {
            LicensingError::Validation(
                "Invalid expiration date; expected YYYY-MM-DD or RFC 3339".into(),
            )
        })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectorRequest {
    #[serde(default)]
    pub name: String,
}

/// `GET /platforms` query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformQuery {
    /// Sector name
    pub sector: Option<String>,
    pub status: Option<PlatformStatus>,
    /// Only the literal `true` enables the filter
    pub expiring: Option<String>,
}

/// `GET /users` query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    /// `false` skips loading platform associations
    pub platforms: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub sector: Option<String>,
    pub position: Option<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub platforms: Vec<PlatformRef>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email.into(),
            role: user.role,
            sector: user.sector,
            position: user.position,
            status: user.status,
            created_at: user.created_at,
            updated_at: user.updated_at,
            platforms: user.platforms,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    /// Only present when the password was generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformResponse {
    pub id: PlatformId,
    pub name: String,
    pub description: Option<String>,
    pub license_type: LicenseType,
    pub license_quantity: Option<i32>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub status: PlatformStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sectors: Vec<SectorRef>,
    pub users: Vec<UserRef>,
}

impl From<Platform> for PlatformResponse {
    fn from(platform: Platform) -> Self {
        Self {
            id: platform.id,
            name: platform.name,
            description: platform.description,
            license_type: platform.license.kind(),
            license_quantity: platform.license.quantity(),
            expiration_date: platform.expiration_date,
            status: platform.status,
            created_at: platform.created_at,
            updated_at: platform.updated_at,
            sectors: platform.sectors,
            users: platform.users,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorResponse {
    pub id: SectorId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Sector> for SectorResponse {
    fn from(sector: Sector) -> Self {
        Self {
            id: sector.id,
            name: sector.name,
            created_at: sector.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expiration_accepts_date_and_instant() {
        assert_eq!(
            parse_expiration(Some("2026-12-31")).unwrap(),
            Some(Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_expiration(Some("2026-12-31T12:00:00-03:00")).unwrap(),
            Some(Utc.with_ymd_and_hms(2026, 12, 31, 15, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_blank_expiration_is_none() {
        assert_eq!(parse_expiration(Some("")).unwrap(), None);
        assert_eq!(parse_expiration(None).unwrap(), None);
    }

    #[test]
    fn test_garbage_expiration_is_rejected() {
        let err = parse_expiration(Some("31/12/2026")).unwrap_err();
        assert!(matches!(err, LicensingError::Validation(_)));
    }

    #[test]
    fn test_platform_request_defaults() {
        let req: PlatformRequest = serde_json::from_str(r#"{"name":"Slack"}"#).unwrap();
        let input = PlatformInput::try_from(req).unwrap();
        assert_eq!(input.license_type, LicenseType::Unlimited);
        assert!(input.sector_ids.is_empty());
        assert_eq!(input.expiration_date, None);
    }
}
