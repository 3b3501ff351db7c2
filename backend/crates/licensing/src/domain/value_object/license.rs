//! License Value Objects
//!
//! A platform is licensed either without limit or for a fixed number of
//! seats. The quantity only exists for `LIMITED` licenses, so the pair is
//! modelled as one enum instead of a type plus a nullable count.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LicensingError, LicensingResult};

/// Wire / storage discriminant of a [`License`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum LicenseType {
    Unlimited = 0,
    Limited = 1,
}

impl LicenseType {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unlimited => "UNLIMITED",
            Self::Limited => "LIMITED",
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Unlimited),
            1 => Some(Self::Limited),
            _ => None,
        }
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum License {
    Unlimited,
    /// Always in `1..=i32::MAX`, the range of the `license_quantity` column
    Limited { quantity: i32 },
}

impl License {
    /// Build from request fields
    ///
    /// A quantity sent with `UNLIMITED` is ignored. `LIMITED` requires a
    /// quantity between one and `i32::MAX`.
    pub fn new(kind: LicenseType, quantity: Option<i64>) -> LicensingResult<Self> {
        match kind {
            LicenseType::Unlimited => Ok(License::Unlimited),
            LicenseType::Limited => {
                let quantity = quantity.ok_or_else(|| {
                    LicensingError::Validation(
                        "License quantity is required for LIMITED licenses".into(),
                    )
                })?;
                let quantity = i32::try_from(quantity)
                    .ok()
                    .filter(|q| *q > 0)
                    .ok_or_else(|| {
                        LicensingError::Validation(format!(
                            "License quantity must be between 1 and {}",
                            i32::MAX
                        ))
                    })?;
                Ok(License::Limited { quantity })
            }
        }
    }

    /// Rebuild from the `license_type` / `license_quantity` columns
    pub fn from_db(kind: i16, quantity: Option<i32>) -> LicensingResult<Self> {
        let kind = LicenseType::from_id(kind)
            .ok_or_else(|| LicensingError::Internal(format!("Invalid license_type: {}", kind)))?;

        match (kind, quantity) {
            (LicenseType::Unlimited, _) => Ok(License::Unlimited),
            (LicenseType::Limited, Some(q)) if q > 0 => Ok(License::Limited { quantity: q }),
            (LicenseType::Limited, other) => Err(LicensingError::Internal(format!(
                "Invalid license_quantity for LIMITED license: {:?}",
                other
            ))),
        }
    }

    #[inline]
    pub fn kind(&self) -> LicenseType {
        match self {
            License::Unlimited => LicenseType::Unlimited,
            License::Limited { .. } => LicenseType::Limited,
        }
    }

    #[inline]
    pub fn quantity(&self) -> Option<i32> {
        match self {
            License::Unlimited => None,
            License::Limited { quantity } => Some(*quantity),
        }
    }

    /// `license_quantity` column value
    pub fn quantity_for_db(&self) -> Option<i32> {
        self.quantity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limited_requires_positive_quantity() {
        assert_eq!(
            License::new(LicenseType::Limited, Some(25)).unwrap(),
            License::Limited { quantity: 25 }
        );
        assert!(License::new(LicenseType::Limited, None).is_err());
        assert!(License::new(LicenseType::Limited, Some(0)).is_err());
        assert!(License::new(LicenseType::Limited, Some(-3)).is_err());
    }

    #[test]
    fn test_quantity_beyond_column_range_is_rejected() {
        let result = License::new(LicenseType::Limited, Some(3_000_000_000));
        assert!(matches!(result, Err(LicensingError::Validation(_))));

        let max = License::new(LicenseType::Limited, Some(i64::from(i32::MAX))).unwrap();
        assert_eq!(max.quantity_for_db(), Some(i32::MAX));
        assert_eq!(License::from_db(1, max.quantity_for_db()).unwrap(), max);
    }

    #[test]
    fn test_unlimited_drops_quantity() {
        let license = License::new(LicenseType::Unlimited, Some(10)).unwrap();
        assert_eq!(license, License::Unlimited);
        assert_eq!(license.quantity(), None);
        assert_eq!(license.quantity_for_db(), None);
    }

    #[test]
    fn test_from_db_rejects_inconsistent_rows() {
        assert_eq!(License::from_db(0, None).unwrap(), License::Unlimited);
        assert_eq!(
            License::from_db(1, Some(3)).unwrap(),
            License::Limited { quantity: 3 }
        );
        assert!(License::from_db(1, None).is_err());
        assert!(License::from_db(5, None).is_err());
    }

    #[test]
    fn test_license_type_wire_format() {
        let kind: LicenseType = serde_json::from_str("\"LIMITED\"").unwrap();
        assert_eq!(kind, LicenseType::Limited);
        assert_eq!(serde_json::to_string(&LicenseType::Unlimited).unwrap(), "\"UNLIMITED\"");
    }
}
