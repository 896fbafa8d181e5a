//! Middleware for Request Processing
//!
//! Bearer-token authentication extractors used by protected routes.

/// Authentication extractors
pub mod auth;

pub use auth::{AuthUser, AuthenticatedUser, MaybeAuthUser};
