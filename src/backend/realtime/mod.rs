//! Real-time Update System
//!
//! One process-wide broadcast channel carries every note change to all
//! connected SSE subscribers. Handlers publish through
//! [`broadcast::broadcast_event`]; clients subscribe through the SSE
//! endpoint in [`subscription`].

/// Broadcast type and helper
pub mod broadcast;

/// SSE subscription handler
pub mod subscription;

pub use broadcast::{broadcast_event, NoteEventBroadcast};
pub use subscription::handle_note_subscription;
