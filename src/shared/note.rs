/**
 * Note Entity and Board Vocabulary
 *
 * This module defines the unified note entity and the enums that describe
 * where a note lives (board type) and what state it is in (status).
 *
 * # Status Model
 *
 * A note is always in exactly one of three states:
 * - `Active` - visible on its board
 * - `Done` - completed, shown in the done list
 * - `Deleted` - removed from boards, restorable until hard-deleted
 *
 * Only a fixed set of transitions is legal:
 * - Active -> Done, Active -> Deleted
 * - Done -> Active (restore)
 * - Deleted -> Active (explicit restore only)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Board a note belongs to: the shared main board or a user's profile board
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BoardType {
    /// The shared board every visitor sees
    Main,
    /// A user's personal board
    Profile,
}

impl Default for BoardType {
    fn default() -> Self {
        BoardType::Main
    }
}

impl BoardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardType::Main => "main",
            BoardType::Profile => "profile",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "main" => Some(BoardType::Main),
            "profile" => Some(BoardType::Profile),
            _ => None,
        }
    }

    /// Parse a client-provided board type, falling back to the main board
    /// for missing or unknown values.
    pub fn from_request(s: Option<&str>) -> Self {
        s.and_then(BoardType::from_str).unwrap_or_default()
    }
}

/// Lifecycle state of a note
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoteStatus {
    /// Visible on its board
    Active,
    /// Completed
    Done,
    /// Removed from boards, restorable
    Deleted,
}

impl Default for NoteStatus {
    fn default() -> Self {
        NoteStatus::Active
    }
}

impl NoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteStatus::Active => "active",
            NoteStatus::Done => "done",
            NoteStatus::Deleted => "deleted",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(NoteStatus::Active),
            "done" => Some(NoteStatus::Done),
            "deleted" => Some(NoteStatus::Deleted),
            _ => None,
        }
    }

    /// Whether moving from `self` to `to` is a legal transition.
    ///
    /// Deleted is terminal here; restoring a deleted note goes through the
    /// explicit restore operation, not a status update.
    pub fn can_transition(&self, to: NoteStatus) -> bool {
        match (self, to) {
            (a, b) if *a == b => true,
            (NoteStatus::Active, NoteStatus::Done) => true,
            (NoteStatus::Active, NoteStatus::Deleted) => true,
            (NoteStatus::Done, NoteStatus::Active) => true,
            _ => false,
        }
    }
}

/// A sticky note on a board
///
/// This is the unified note entity: position, body, owner, lifecycle
/// status, privacy flag, board tag, presentation color and reaction
/// counters. Field names serialize in camelCase to match the API surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique note ID
    pub id: i64,
    /// Short title (empty for untitled notes)
    #[serde(default)]
    pub title: String,
    /// Free-text body
    pub text: String,
    /// Horizontal position on the board
    pub x: i32,
    /// Vertical position on the board
    pub y: i32,
    /// Username of the note's creator
    pub username: String,
    /// Lifecycle status
    #[serde(default)]
    pub status: NoteStatus,
    /// Whether the note is hidden from other users
    #[serde(default)]
    pub is_private: bool,
    /// Which board the note belongs to
    #[serde(default)]
    pub board_type: BoardType,
    /// Display color (hex)
    pub color: String,
    /// Like counter
    #[serde(default)]
    pub likes: i32,
    /// Dislike counter
    #[serde(default)]
    pub dislikes: i32,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Convenience flag matching the legacy "done" boolean
    pub fn is_done(&self) -> bool {
        self.status == NoteStatus::Done
    }
}

/// Default display color for new notes
pub const DEFAULT_NOTE_COLOR: &str = "#fff9c4";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_type_from_request_defaults_to_main() {
        assert_eq!(BoardType::from_request(None), BoardType::Main);
        assert_eq!(BoardType::from_request(Some("profile")), BoardType::Profile);
        assert_eq!(BoardType::from_request(Some("garbage")), BoardType::Main);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [NoteStatus::Active, NoteStatus::Done, NoteStatus::Deleted] {
            assert_eq!(NoteStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(NoteStatus::from_str("DONE"), Some(NoteStatus::Done));
        assert_eq!(NoteStatus::from_str("archived"), None);
    }

    #[test]
    fn test_legal_transitions() {
        assert!(NoteStatus::Active.can_transition(NoteStatus::Done));
        assert!(NoteStatus::Active.can_transition(NoteStatus::Deleted));
        assert!(NoteStatus::Done.can_transition(NoteStatus::Active));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!NoteStatus::Done.can_transition(NoteStatus::Deleted));
        assert!(!NoteStatus::Deleted.can_transition(NoteStatus::Active));
        assert!(!NoteStatus::Deleted.can_transition(NoteStatus::Done));
    }

    #[test]
    fn test_same_status_is_a_no_op() {
        assert!(NoteStatus::Active.can_transition(NoteStatus::Active));
        assert!(NoteStatus::Deleted.can_transition(NoteStatus::Deleted));
    }

    #[test]
    fn test_note_serializes_camel_case() {
        let note = Note {
            id: 1,
            title: String::new(),
            text: "buy milk".to_string(),
            x: 100,
            y: 200,
            username: "alice".to_string(),
            status: NoteStatus::Active,
            is_private: false,
            board_type: BoardType::Main,
            color: DEFAULT_NOTE_COLOR.to_string(),
            likes: 0,
            dislikes: 0,
            created_at: Utc::now(),
            updated_at: None,
        };

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["boardType"], "main");
        assert_eq!(json["isPrivate"], false);
        assert_eq!(json["status"], "active");
    }
}
