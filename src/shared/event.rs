/**
 * Real-time Note Events
 *
 * This module defines the event type broadcast to all SSE subscribers
 * whenever a note changes. Delivery is best-effort and at-most-once per
 * observer: a client that connects after an event simply does not see it
 * and must re-fetch board state on connect.
 *
 * # Wire Format
 *
 * - A saved (created or updated) note is pushed as its JSON serialization.
 * - A deletion is pushed as the sentinel string `deleted:<id>`.
 */
use serde::{Deserialize, Serialize};

use crate::shared::note::Note;

/// A single board change pushed to live subscribers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum NoteEvent {
    /// A note was created or updated; carries the full record
    Saved(Note),
    /// A note was deleted; carries only the id
    Deleted(i64),
}

impl NoteEvent {
    /// Serialize the event into the SSE data payload.
    ///
    /// Saved notes become their JSON form; deletions become the
    /// `deleted:<id>` sentinel clients match on.
    pub fn to_sse_data(&self) -> Result<String, serde_json::Error> {
        match self {
            NoteEvent::Saved(note) => serde_json::to_string(note),
            NoteEvent::Deleted(id) => Ok(format!("deleted:{}", id)),
        }
    }

    /// SSE event name for this event
    pub fn event_name(&self) -> &'static str {
        "note"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::note::{BoardType, NoteStatus, DEFAULT_NOTE_COLOR};
    use chrono::Utc;

    fn sample_note() -> Note {
        Note {
            id: 7,
            title: String::new(),
            text: "water the plants".to_string(),
            x: 10,
            y: 20,
            username: "alice".to_string(),
            status: NoteStatus::Active,
            is_private: false,
            board_type: BoardType::Main,
            color: DEFAULT_NOTE_COLOR.to_string(),
            likes: 0,
            dislikes: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_saved_event_carries_note_json() {
        let event = NoteEvent::Saved(sample_note());
        let data = event.to_sse_data().unwrap();
        let value: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["text"], "water the plants");
    }

    #[test]
    fn test_deleted_event_uses_sentinel() {
        let event = NoteEvent::Deleted(42);
        assert_eq!(event.to_sse_data().unwrap(), "deleted:42");
    }
}
