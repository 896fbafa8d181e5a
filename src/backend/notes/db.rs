/**
 * Database Operations for Notes
 *
 * This module contains all persistence operations for the unified note
 * entity. Listing goes through one consolidated filter applied as a
 * conjunctive predicate; there are no silent fallbacks to wider result
 * sets.
 */
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, QueryBuilder, Row};

use crate::shared::note::{BoardType, Note, NoteStatus, DEFAULT_NOTE_COLOR};

const NOTE_COLUMNS: &str = "id, title, text, x, y, username, status, is_private, board_type, color, likes, dislikes, created_at, updated_at";

/// Conjunctive note filter
///
/// Every set field narrows the result; unset fields do not constrain.
/// `matches` mirrors the SQL predicate exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteFilter {
    pub username: Option<String>,
    pub board_type: Option<BoardType>,
    pub is_private: Option<bool>,
    pub status: Option<NoteStatus>,
}

impl NoteFilter {
    /// Whether a note satisfies every set predicate
    pub fn matches(&self, note: &Note) -> bool {
        if let Some(username) = &self.username {
            if &note.username != username {
                return false;
            }
        }
        if let Some(board_type) = self.board_type {
            if note.board_type != board_type {
                return false;
            }
        }
        if let Some(is_private) = self.is_private {
            if note.is_private != is_private {
                return false;
            }
        }
        if let Some(status) = self.status {
            if note.status != status {
                return false;
            }
        }
        true
    }
}

/// Fields of a note to be created
///
/// Defaults fill in what the client omitted: main board, public,
/// active, standard color, empty title.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub username: String,
    pub status: NoteStatus,
    pub is_private: bool,
    pub board_type: BoardType,
    pub color: String,
}

impl NewNote {
    pub fn new(text: impl Into<String>, username: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            title: String::new(),
            text: text.into(),
            x,
            y,
            username: username.into(),
            status: NoteStatus::Active,
            is_private: false,
            board_type: BoardType::Main,
            color: DEFAULT_NOTE_COLOR.to_string(),
        }
    }
}

fn note_from_row(row: &PgRow) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        text: row.get("text"),
        x: row.get("x"),
        y: row.get("y"),
        username: row.get("username"),
        status: NoteStatus::from_str(row.get::<String, _>("status").as_str())
            .unwrap_or(NoteStatus::Active),
        is_private: row.get("is_private"),
        board_type: BoardType::from_str(row.get::<String, _>("board_type").as_str())
            .unwrap_or(BoardType::Main),
        color: row.get("color"),
        likes: row.get("likes"),
        dislikes: row.get("dislikes"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// List notes matching a filter, newest first
pub async fn list_notes(pool: &PgPool, filter: &NoteFilter) -> Result<Vec<Note>, sqlx::Error> {
    let mut builder: QueryBuilder<sqlx::Postgres> =
        QueryBuilder::new(format!("SELECT {} FROM notes WHERE 1=1", NOTE_COLUMNS));

    if let Some(username) = &filter.username {
        builder.push(" AND username = ").push_bind(username.clone());
    }
    if let Some(board_type) = filter.board_type {
        builder
            .push(" AND board_type = ")
            .push_bind(board_type.as_str());
    }
    if let Some(is_private) = filter.is_private {
        builder.push(" AND is_private = ").push_bind(is_private);
    }
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
    builder.push(" ORDER BY id DESC");

    let rows = builder.build().fetch_all(pool).await?;
    Ok(rows.iter().map(note_from_row).collect())
}

/// Create a note
pub async fn create_note(pool: &PgPool, new_note: &NewNote) -> Result<Note, sqlx::Error> {
    let now = Utc::now();

    let row = sqlx::query(&format!(
        r#"
        INSERT INTO notes (title, text, x, y, username, status, is_private, board_type, color, likes, dislikes, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0, 0, $10)
        RETURNING {}
        "#,
        NOTE_COLUMNS
    ))
    .bind(&new_note.title)
    .bind(&new_note.text)
    .bind(new_note.x)
    .bind(new_note.y)
    .bind(&new_note.username)
    .bind(new_note.status.as_str())
    .bind(new_note.is_private)
    .bind(new_note.board_type.as_str())
    .bind(&new_note.color)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(note_from_row(&row))
}

/// Get a note by id
pub async fn get_note_by_id(pool: &PgPool, id: i64) -> Result<Option<Note>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM notes WHERE id = $1",
        NOTE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(note_from_row))
}

/// Update a note's position
pub async fn update_position(
    pool: &PgPool,
    id: i64,
    x: i32,
    y: i32,
) -> Result<Option<Note>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE notes SET x = $1, y = $2, updated_at = $3
        WHERE id = $4
        RETURNING {}
        "#,
        NOTE_COLUMNS
    ))
    .bind(x)
    .bind(y)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(note_from_row))
}

/// Set a note's status
///
/// Transition legality is the handler's responsibility; this is the raw
/// write used by both status updates and restores.
pub async fn update_status(
    pool: &PgPool,
    id: i64,
    status: NoteStatus,
) -> Result<Option<Note>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE notes SET status = $1, updated_at = $2
        WHERE id = $3
        RETURNING {}
        "#,
        NOTE_COLUMNS
    ))
    .bind(status.as_str())
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(note_from_row))
}

/// Increment a note's like counter
pub async fn increment_likes(pool: &PgPool, id: i64) -> Result<Option<Note>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE notes SET likes = likes + 1, updated_at = $1
        WHERE id = $2
        RETURNING {}
        "#,
        NOTE_COLUMNS
    ))
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(note_from_row))
}

/// Increment a note's dislike counter
pub async fn increment_dislikes(pool: &PgPool, id: i64) -> Result<Option<Note>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE notes SET dislikes = dislikes + 1, updated_at = $1
        WHERE id = $2
        RETURNING {}
        "#,
        NOTE_COLUMNS
    ))
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(note_from_row))
}

/// Hard-delete a note, returning whether a row was removed
pub async fn delete_note(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM notes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Distinct status values present in the table
pub async fn distinct_statuses(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    let rows = sqlx::query("SELECT DISTINCT status FROM notes ORDER BY status")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(|r| r.get("status")).collect())
}

/// Number of notes owned by a user
pub async fn count_by_username(pool: &PgPool, username: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE username = $1")
        .bind(username)
        .fetch_one(pool)
        .await
}
