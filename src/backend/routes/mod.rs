//! Route Configuration
//!
//! Router assembly: the `/api` surface in [`api_routes`], combined with
//! diagnostics, CORS and the fallback handler in [`router`].

/// API route configuration
pub mod api_routes;

/// Main router creation
pub mod router;

pub use router::create_router;
