//! Input normalisation shared by the use cases

use crate::error::{LicensingError, LicensingResult};

/// Trimmed, non-empty text
pub(crate) fn required(value: &str, field: &str) -> LicensingResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LicensingError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Trimmed text; blank becomes `None`
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Drop repeated ids, keeping first occurrence order
pub(crate) fn unique<T: PartialEq + Copy>(ids: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(id) {
            out.push(*id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims_and_rejects_blank() {
        assert_eq!(required("  Figma ", "Name").unwrap(), "Figma");
        let err = required("   ", "Name").unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_optional_blank_is_none() {
        assert_eq!(optional(Some(" ".into())), None);
        assert_eq!(optional(Some(" Dev ".into())), Some("Dev".into()));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn test_unique_keeps_first_order() {
        assert_eq!(unique(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }
}
