//! Backend Module
//!
//! This module contains all server-side code for the Stickyboard
//! application: a complete Axum HTTP server with JWT authentication,
//! note/board CRUD, real-time SSE broadcasting, and the external AI and
//! billing integrations.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`middleware`** - Bearer-token authentication extractors
//! - **`auth`** - Authentication, JWT tokens, user management
//! - **`notes`** - Unified note persistence, handlers, legacy adapter
//! - **`boards`** - Board persistence and handlers
//! - **`realtime`** - Note event broadcasting and the SSE stream
//! - **`ai`** - Local note analysis and the Gemini integration
//! - **`billing`** - Stripe integration and subscription tiers
//! - **`health`** - Diagnostics endpoints
//! - **`error`** - Backend error types
//!
//! # State Management
//!
//! All shared state lives in `AppState`: the optional database pool,
//! the process-wide broadcast channel, parsed configuration, and the
//! external API clients. Everything in it is cheap to clone and safe
//! for concurrent access; entity state is owned by the database and
//! accessed per request.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, ApiError>` and propagate with `?`; the
//! `IntoResponse` impl maps each error class to its HTTP status.

/// Local note analysis and the Gemini integration
pub mod ai;

/// Authentication and user management
pub mod auth;

/// Stripe integration and subscription tiers
pub mod billing;

/// Board persistence and handlers
pub mod boards;

/// Backend error types
pub mod error;

/// Diagnostics endpoints
pub mod health;

/// Bearer-token authentication extractors
pub mod middleware;

/// Unified note persistence, handlers, legacy adapter
pub mod notes;

/// Note event broadcasting and the SSE stream
pub mod realtime;

/// Route configuration
pub mod routes;

/// Server setup and configuration
pub mod server;

/// Re-export commonly used types
pub use error::ApiError;
pub use realtime::{broadcast_event, NoteEventBroadcast};
pub use server::create_app;
