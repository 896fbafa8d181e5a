/**
 * Legacy Note Adapter
 *
 * The first revision of the board stored notes in a `sticky_notes` table
 * with a boolean `done` flag instead of the status enum, and without
 * titles, colors, or reaction counters. This module is the explicit
 * migration boundary for that table: read-side queries plus a mapping
 * into the unified note shape.
 *
 * Only two operations consult it, both as documented fallbacks:
 * - `by-status` reads, when the unified table has no rows for the user
 * - `restore`, when the id exists only in the legacy table
 *
 * Nothing else touches legacy data.
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::shared::note::{BoardType, Note, NoteStatus, DEFAULT_NOTE_COLOR};

/// A row from the legacy `sticky_notes` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LegacyNote {
    pub id: i64,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub text: String,
    pub done: bool,
    pub username: String,
    pub is_private: bool,
    pub board_type: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl LegacyNote {
    /// Map a legacy row into the unified note shape
    ///
    /// Missing columns get the unified defaults: empty title, position
    /// (100, 100), standard color, zeroed counters. The status comes
    /// from the caller's requested view - a legacy row has no deleted
    /// state of its own, `done = true` serves as both.
    pub fn into_note(self, requested: NoteStatus) -> Note {
        Note {
            id: self.id,
            title: String::new(),
            text: self.text,
            x: self.x.unwrap_or(100),
            y: self.y.unwrap_or(100),
            username: self.username,
            status: requested,
            is_private: self.is_private,
            board_type: BoardType::from_str(&self.board_type).unwrap_or(BoardType::Main),
            color: DEFAULT_NOTE_COLOR.to_string(),
            likes: 0,
            dislikes: 0,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            updated_at: None,
        }
    }
}

const LEGACY_COLUMNS: &str = "id, x, y, text, done, username, is_private, board_type, created_at";

/// Legacy rows for a user, by done flag and optional board
///
/// `board_type = None` means all boards (the "all" view unions main
/// and profile).
pub async fn find_for_user(
    pool: &PgPool,
    username: &str,
    done: bool,
    board_type: Option<BoardType>,
) -> Result<Vec<LegacyNote>, sqlx::Error> {
    let notes = match board_type {
        Some(board) => {
            sqlx::query_as::<_, LegacyNote>(&format!(
                r#"
                SELECT {} FROM sticky_notes
                WHERE username = $1 AND done = $2 AND board_type = $3
                ORDER BY id DESC
                "#,
                LEGACY_COLUMNS
            ))
            .bind(username)
            .bind(done)
            .bind(board.as_str())
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, LegacyNote>(&format!(
                r#"
                SELECT {} FROM sticky_notes
                WHERE username = $1 AND done = $2
                ORDER BY id DESC
                "#,
                LEGACY_COLUMNS
            ))
            .bind(username)
            .bind(done)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(notes)
}

/// A single legacy row by id
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<LegacyNote>, sqlx::Error> {
    sqlx::query_as::<_, LegacyNote>(&format!(
        "SELECT {} FROM sticky_notes WHERE id = $1",
        LEGACY_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Clear a legacy row's done flag (restore), returning the updated row
pub async fn restore(pool: &PgPool, id: i64) -> Result<Option<LegacyNote>, sqlx::Error> {
    sqlx::query_as::<_, LegacyNote>(&format!(
        r#"
        UPDATE sticky_notes SET done = false
        WHERE id = $1
        RETURNING {}
        "#,
        LEGACY_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy(done: bool) -> LegacyNote {
        LegacyNote {
            id: 11,
            x: None,
            y: Some(250),
            text: "old note".to_string(),
            done,
            username: "alice".to_string(),
            is_private: true,
            board_type: "profile".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_mapping_fills_defaults() {
        let note = legacy(false).into_note(NoteStatus::Active);
        assert_eq!(note.id, 11);
        assert_eq!(note.title, "");
        assert_eq!(note.x, 100);
        assert_eq!(note.y, 250);
        assert_eq!(note.color, DEFAULT_NOTE_COLOR);
        assert_eq!(note.likes, 0);
        assert_eq!(note.board_type, BoardType::Profile);
        assert!(note.is_private);
    }

    #[test]
    fn test_mapping_takes_requested_status() {
        assert_eq!(
            legacy(true).into_note(NoteStatus::Done).status,
            NoteStatus::Done
        );
        assert_eq!(
            legacy(true).into_note(NoteStatus::Deleted).status,
            NoteStatus::Deleted
        );
        assert_eq!(
            legacy(false).into_note(NoteStatus::Active).status,
            NoteStatus::Active
        );
    }

    #[test]
    fn test_mapping_handles_unknown_board() {
        let mut row = legacy(false);
        row.board_type = "garbage".to_string();
        assert_eq!(row.into_note(NoteStatus::Active).board_type, BoardType::Main);
    }
}
