//! Server Configuration
//!
//! Everything read from the environment at start-up. `.env` is loaded by
//! `main` before this runs.

use std::fmt;

use anyhow::{Context, bail};
use axum::http::HeaderValue;

use auth::AuthConfig;
use licensing::LicensingConfig;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

/// Bootstrap admin used by debug builds when none is configured
const DEV_ADMIN_EMAIL: &str = "test@example.com";
const DEV_ADMIN_PASSWORD: &str = "password123";

pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub frontend_origins: Vec<HeaderValue>,
    /// `None` only in debug builds: a random secret is generated
    pub jwt_secret: Option<Vec<u8>>,
    pub password_pepper: Option<Vec<u8>>,
    pub include_expired: bool,
    /// Email and password of the account created at start-up if missing
    pub seed_admin: Option<(String, String)>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    fn from_lookup(
        get: impl Fn(&str) -> Option<String>,
        debug_build: bool,
    ) -> anyhow::Result<Self> {
        let var = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let port = match var("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port: {}", port))?,
            None => DEFAULT_PORT,
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();

        let jwt_secret = var("JWT_SECRET").map(String::into_bytes);
        if jwt_secret.is_none() && !debug_build {
            bail!("JWT_SECRET must be set in production");
        }

        let include_expired = match var("EXPIRING_INCLUDE_EXPIRED").as_deref() {
            None => false,
            Some(v) => v
                .trim()
                .parse::<bool>()
                .with_context(|| format!("EXPIRING_INCLUDE_EXPIRED must be true or false: {}", v))?,
        };

        let seed_admin = match (var("SEED_ADMIN_EMAIL"), var("SEED_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some((email, password)),
            (None, None) if debug_build => {
                Some((DEV_ADMIN_EMAIL.to_string(), DEV_ADMIN_PASSWORD.to_string()))
            }
            (None, None) => None,
            _ => bail!("SEED_ADMIN_EMAIL and SEED_ADMIN_PASSWORD must be set together"),
        };

        Ok(Self {
            database_url,
            port,
            frontend_origins,
            jwt_secret,
            password_pepper: var("PASSWORD_PEPPER").map(String::into_bytes),
            include_expired,
            seed_admin,
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        let config = match &self.jwt_secret {
            Some(secret) => AuthConfig::with_secret(secret.clone()),
            None => {
                tracing::warn!("JWT_SECRET not set; using a random secret for this run");
                AuthConfig::development()
            }
        };

        AuthConfig {
            password_pepper: self.password_pepper.clone(),
            ..config
        }
    }

    pub fn licensing_config(&self) -> LicensingConfig {
        LicensingConfig::default()
            .with_pepper(self.password_pepper.clone())
            .including_expired(self.include_expired)
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database_url", &"[REDACTED]")
            .field("port", &self.port)
            .field("frontend_origins", &self.frontend_origins)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("include_expired", &self.include_expired)
            .field("seed_admin", &self.seed_admin.as_ref().map(|(email, _)| email))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_debug_defaults() {
        let config =
            ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://x")]), true).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.frontend_origins.len(), 2);
        assert!(config.jwt_secret.is_none());
        assert!(!config.include_expired);
        assert_eq!(
            config.seed_admin,
            Some(("test@example.com".to_string(), "password123".to_string()))
        );
    }

    #[test]
    fn test_release_requires_secret_and_skips_dev_admin() {
        let env = [("DATABASE_URL", "postgres://x")];
        assert!(ServerConfig::from_lookup(lookup(&env), false).is_err());

        let env = [("DATABASE_URL", "postgres://x"), ("JWT_SECRET", "s3cret")];
        let config = ServerConfig::from_lookup(lookup(&env), false).unwrap();
        assert_eq!(config.jwt_secret.as_deref(), Some(&b"s3cret"[..]));
        assert!(config.seed_admin.is_none());
    }

    #[test]
    fn test_missing_database_url() {
        assert!(ServerConfig::from_lookup(lookup(&[]), true).is_err());
    }

    #[test]
    fn test_overrides() {
        let env = [
            ("DATABASE_URL", "postgres://x"),
            ("PORT", "8080"),
            ("FRONTEND_ORIGINS", "https://admin.example.com"),
            ("EXPIRING_INCLUDE_EXPIRED", "true"),
            ("PASSWORD_PEPPER", "pep"),
        ];
        let config = ServerConfig::from_lookup(lookup(&env), true).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.frontend_origins,
            vec![HeaderValue::from_static("https://admin.example.com")]
        );
        assert!(config.licensing_config().expiry.include_expired);
        assert_eq!(config.auth_config().pepper(), Some(&b"pep"[..]));
        assert_eq!(config.licensing_config().pepper(), Some(&b"pep"[..]));
    }

    #[test]
    fn test_half_configured_admin_is_an_error() {
        let env = [("DATABASE_URL", "postgres://x"), ("SEED_ADMIN_EMAIL", "a@b.io")];
        assert!(ServerConfig::from_lookup(lookup(&env), true).is_err());
    }
}
