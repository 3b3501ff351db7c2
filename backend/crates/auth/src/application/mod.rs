//! Sign-in and token verification

pub mod config;
pub mod sign_in;
pub mod verify_token;

pub use config::AuthConfig;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use verify_token::VerifyTokenUseCase;
