//! Notes Module
//!
//! The consolidated notes surface: persistence over the unified note
//! table, HTTP handlers for `/api/notes`, and the explicit adapter for
//! the pre-migration legacy table.
//!
//! # Module Structure
//!
//! ```text
//! notes/
//! ├── mod.rs      - Module exports
//! ├── db.rs       - Queries over the unified notes table
//! ├── handlers.rs - HTTP endpoint handlers
//! └── legacy.rs   - Legacy table adapter (by-status and restore fallbacks)
//! ```

/// Queries over the unified notes table
pub mod db;

/// HTTP endpoint handlers
pub mod handlers;

/// Legacy table adapter
pub mod legacy;
