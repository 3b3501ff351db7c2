//! Presentation Layer
//!
//! HTTP handlers, DTOs and the role-gated router.

pub mod dto;
pub mod handlers;
pub mod router;
