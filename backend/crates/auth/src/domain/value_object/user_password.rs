//! User Password Value Objects
//!
//! Domain wrappers around `platform::password`:
//! - [`RawPassword`] - clear text from a request, zeroized on drop
//! - [`UserPassword`] - Argon2id PHC string as stored in `users.password_hash`
//!
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("password123".to_string()).unwrap();
//! let stored = UserPassword::from_raw(&raw, None).unwrap();
//!
//! let attempt = RawPassword::for_verification("password123".to_string());
//! assert!(stored.verify(&attempt, None));
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a password that will be stored
    ///
    /// ## Errors
    /// `400 Bad Request` with a user-facing message when the policy fails
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { .. } => AppError::bad_request(e.to_string())
                .with_action("Please choose a longer password"),
            PasswordPolicyError::TooLong { .. } => AppError::bad_request(e.to_string())
                .with_action("Please choose a shorter password"),
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
            }
            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
                    .with_action("Please remove any special control characters")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Login attempt: normalized, never rejected by policy
    pub fn for_verification(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    /// Random password for accounts created without one
    pub fn generate() -> Self {
        Self(ClearTextPassword::generate())
    }

    /// Clear text, for returning a generated password exactly once
    pub fn expose(&self) -> &str {
        self.0.expose()
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Hashed user password for database storage
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw
            .0
            .hash(pepper)
            .map_err(|e| AppError::internal("Password hashing failed").with_source(e))?;

        Ok(Self(hashed))
    }

    /// Parse the PHC string loaded from the database
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|e| AppError::internal("Invalid password hash in database").with_source(e))?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification; the pepper must match the one used when hashing
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
