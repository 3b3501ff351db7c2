pub mod access_claims;
pub mod email;
pub mod user_password;
pub mod user_role;
pub mod user_status;
