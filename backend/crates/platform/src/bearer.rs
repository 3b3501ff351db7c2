//! Bearer Token Header Utilities

use axum::http::{HeaderMap, header};

/// Extract the token from `Authorization: Bearer <token>`
///
/// The scheme is matched case-insensitively. Returns `None` when the header
/// is absent, not valid ASCII, uses another scheme, or carries an empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let headers = headers_with("bearer abc");
        assert_eq!(extract_bearer_token(&headers), Some("abc"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_other_scheme_or_empty_token() {
        assert_eq!(extract_bearer_token(&headers_with("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(extract_bearer_token(&headers_with("Bearer")), None);
    }
}
