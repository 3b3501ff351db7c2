//! Login endpoint plus the bearer-token guard other routers mount.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AccessGuard, authenticate, authorize};
pub use router::{auth_router, auth_router_generic};
