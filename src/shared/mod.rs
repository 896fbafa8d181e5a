//! Shared Module
//!
//! This module contains the domain types used across module boundaries:
//! the unified note entity, its status and board enums, and the real-time
//! event type pushed to SSE subscribers. All types are designed for
//! serialization and transmission over HTTP.

/// Note entity, status and board enums
pub mod note;

/// Real-time event system
pub mod event;

/// Re-export commonly used types for convenience
pub use event::NoteEvent;
pub use note::{BoardType, Note, NoteStatus};
