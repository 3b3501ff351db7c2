//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Secure random bytes and URL-safe tokens
//! - Password hashing (Argon2id, NIST SP 800-63B length rules)
//! - HS256 signed tokens
//! - `Authorization: Bearer` header parsing

pub mod bearer;
pub mod crypto;
pub mod password;
pub mod token;
