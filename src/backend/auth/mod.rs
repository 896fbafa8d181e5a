//! Authentication and User Management
//!
//! JWT session tokens, user persistence, and the HTTP handlers for
//! login, registration, refresh and profile.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs      - Module exports
//! ├── sessions.rs - Token generation and validation
//! ├── users.rs    - User model, roles, database operations
//! └── handlers/   - HTTP endpoint handlers
//! ```

/// HTTP endpoint handlers
pub mod handlers;

/// Token generation and validation
pub mod sessions;

/// User model and database operations
pub mod users;
