//! Signed Tokens (HS256 JWT)
//!
//! Stateless bearer tokens: the claims are signed with an application
//! secret and verified on every request. Nothing is persisted server-side.
//!
//! Expiry is checked with zero leeway; the claims type must carry an `exp`
//! field (seconds since the Unix epoch).

use std::fmt;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Token is invalid")]
    Invalid,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// HMAC-SHA256 signer / verifier
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn hs256(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, returning the decoded claims
    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        decode::<C>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &"HS256")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        exp: i64,
    }

    fn claims_expiring_in(seconds: i64) -> TestClaims {
        TestClaims {
            sub: "user-1".to_string(),
            exp: Utc::now().timestamp() + seconds,
        }
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = TokenSigner::hs256(b"test-secret");
        let claims = claims_expiring_in(3600);

        let token = signer.sign(&claims).unwrap();
        let decoded: TestClaims = signer.verify(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_expired_token() {
        let signer = TokenSigner::hs256(b"test-secret");
        let token = signer.sign(&claims_expiring_in(-10)).unwrap();

        let result = signer.verify::<TestClaims>(&token);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = TokenSigner::hs256(b"secret-a")
            .sign(&claims_expiring_in(3600))
            .unwrap();

        let result = TokenSigner::hs256(b"secret-b").verify::<TestClaims>(&token);
        assert!(matches!(result, Err(TokenError::Invalid)));
    }

    #[test]
    fn test_garbage_is_invalid() {
        let signer = TokenSigner::hs256(b"test-secret");
        assert!(matches!(
            signer.verify::<TestClaims>("not.a.token"),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let signer = TokenSigner::hs256(b"test-secret");
        let token = signer.sign(&claims_expiring_in(3600)).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = TokenSigner::hs256(b"other")
            .sign(&TestClaims {
                sub: "admin".to_string(),
                exp: Utc::now().timestamp() + 3600,
            })
            .unwrap();
        let forged_payload = forged.split('.').nth(1).unwrap().to_string();
        parts[1] = &forged_payload;

        let result = signer.verify::<TestClaims>(&parts.join("."));
        assert!(matches!(result, Err(TokenError::Invalid)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let signer = TokenSigner::hs256(b"super-secret");
        let debug = format!("{:?}", signer);
        assert!(!debug.contains("super-secret"));
    }
}
