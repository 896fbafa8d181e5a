/**
 * Note Handlers
 *
 * HTTP endpoint handlers for the consolidated notes surface under
 * `/api/notes`. Reads of the public main board are anonymous; status
 * views are scoped to the authenticated caller. Every successful
 * mutation publishes a note event to the broadcast channel.
 */
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::notes::db::{self, NewNote, NoteFilter};
use crate::backend::notes::legacy;
use crate::backend::realtime::broadcast::broadcast_event;
use crate::backend::server::state::AppState;
use crate::shared::note::{BoardType, Note, NoteStatus, DEFAULT_NOTE_COLOR};
use crate::shared::NoteEvent;

/// Body for creating a note
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub username: String,
    #[serde(default)]
    pub is_private: Option<bool>,
    #[serde(default)]
    pub board_type: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl CreateNoteRequest {
    /// Apply creation defaults: main board for missing or invalid board
    /// types, public, active, standard color, empty title.
    pub fn into_new_note(self) -> NewNote {
        NewNote {
            title: self.title.unwrap_or_default(),
            text: self.text,
            x: self.x,
            y: self.y,
            username: self.username,
            status: NoteStatus::Active,
            is_private: self.is_private.unwrap_or(false),
            board_type: BoardType::from_request(self.board_type.as_deref()),
            color: self
                .color
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_NOTE_COLOR.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileParams {
    pub is_private: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PositionUpdate {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ByStatusParams {
    pub status: String,
    pub board_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub status: String,
}

/// Resolve a by-status board parameter: missing or `all` means both boards
pub fn resolve_board_param(board_type: Option<&str>) -> Result<Option<BoardType>, ApiError> {
    match board_type {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => BoardType::from_str(s)
            .map(Some)
            .ok_or_else(|| ApiError::validation(format!("Unknown board type: {}", s))),
    }
}

fn parse_status(status: &str) -> Result<NoteStatus, ApiError> {
    NoteStatus::from_str(status)
        .ok_or_else(|| ApiError::validation(format!("Unknown status: {}", status)))
}

/// 200 with the list, or 204 when it is empty
fn list_response(notes: Vec<Note>) -> Response {
    if notes.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(notes).into_response()
    }
}

/// GET /api/notes - public main-board notes, optionally for one owner
pub async fn list_notes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    let pool = state.pool()?;

    let filter = NoteFilter {
        username: params.username.filter(|u| !u.is_empty()),
        board_type: Some(BoardType::Main),
        is_private: Some(false),
        status: None,
    };

    let notes = db::list_notes(pool, &filter).await?;
    Ok(list_response(notes))
}

/// GET /api/notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Note>, ApiError> {
    let pool = state.pool()?;
    let note = db::get_note_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Note {} not found", id)))?;
    Ok(Json(note))
}

/// GET /api/notes/profile/{username} - profile-board notes
pub async fn profile_notes(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<ProfileParams>,
) -> Result<Response, ApiError> {
    let pool = state.pool()?;

    let filter = NoteFilter {
        username: Some(username),
        board_type: Some(BoardType::Profile),
        is_private: params.is_private,
        status: None,
    };

    let notes = db::list_notes(pool, &filter).await?;
    tracing::debug!(
        "Found {} profile notes (isPrivate={:?})",
        notes.len(),
        params.is_private
    );
    Ok(list_response(notes))
}

/// GET /api/notes/user/{username} - profile-board notes for a user
pub async fn user_notes(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Response, ApiError> {
    let pool = state.pool()?;

    let filter = NoteFilter {
        username: Some(username),
        board_type: Some(BoardType::Profile),
        ..Default::default()
    };

    let notes = db::list_notes(pool, &filter).await?;
    Ok(list_response(notes))
}

/// GET /api/notes/user/{username}/private
pub async fn user_private_notes(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Response, ApiError> {
    let pool = state.pool()?;

    let filter = NoteFilter {
        username: Some(username),
        board_type: Some(BoardType::Profile),
        is_private: Some(true),
        status: None,
    };

    let notes = db::list_notes(pool, &filter).await?;
    Ok(list_response(notes))
}

/// GET /api/notes/user/{username}/public
pub async fn user_public_notes(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Response, ApiError> {
    let pool = state.pool()?;

    let filter = NoteFilter {
        username: Some(username),
        is_private: Some(false),
        ..Default::default()
    };

    let notes = db::list_notes(pool, &filter).await?;
    Ok(list_response(notes))
}

/// POST /api/notes - create a note
pub async fn create_note(
    State(state): State<AppState>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let pool = state.pool()?;

    if request.text.trim().is_empty() {
        return Err(ApiError::validation("Note text cannot be empty"));
    }
    if request.username.trim().is_empty() {
        return Err(ApiError::validation("Note owner username is required"));
    }

    let new_note = request.into_new_note();
    tracing::debug!(
        "Creating note with boardType: {}, isPrivate: {}",
        new_note.board_type.as_str(),
        new_note.is_private
    );

    let note = db::create_note(pool, &new_note).await?;
    broadcast_event(&state.note_broadcast, NoteEvent::Saved(note.clone()));
    Ok((StatusCode::CREATED, Json(note)))
}

/// PUT /api/notes/{id} - move a note
pub async fn move_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(position): Json<PositionUpdate>,
) -> Result<Json<Note>, ApiError> {
    let pool = state.pool()?;

    let note = db::update_position(pool, id, position.x, position.y)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Note {} not found", id)))?;

    broadcast_event(&state.note_broadcast, NoteEvent::Saved(note.clone()));
    Ok(Json(note))
}

/// PATCH /api/notes/{id}/position - move a note (query form)
pub async fn patch_position(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(position): Query<PositionUpdate>,
) -> Result<Json<Note>, ApiError> {
    let pool = state.pool()?;

    let note = db::update_position(pool, id, position.x, position.y)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Note {} not found", id)))?;

    broadcast_event(&state.note_broadcast, NoteEvent::Saved(note.clone()));
    Ok(Json(note))
}

async fn transition_note(state: &AppState, id: i64, to: NoteStatus) -> Result<Note, ApiError> {
    let pool = state.pool()?;

    let note = db::get_note_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Note {} not found", id)))?;

    if !note.status.can_transition(to) {
        return Err(ApiError::validation(format!(
            "Illegal status transition: {} -> {}",
            note.status.as_str(),
            to.as_str()
        )));
    }

    let updated = db::update_status(pool, id, to)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Note {} not found", id)))?;

    broadcast_event(&state.note_broadcast, NoteEvent::Saved(updated.clone()));
    Ok(updated)
}

/// PUT /api/notes/{id}/done - mark a note completed
pub async fn mark_done(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Note>, ApiError> {
    let note = transition_note(&state, id, NoteStatus::Done).await?;
    Ok(Json(note))
}

/// PATCH /api/notes/{id}/status?status= - explicit status transition
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<StatusParams>,
) -> Result<Json<Note>, ApiError> {
    let to = parse_status(&params.status)?;
    let note = transition_note(&state, id, to).await?;
    Ok(Json(note))
}

/// POST /api/notes/{id}/restore - bring a note back to active
///
/// Restore is the one path allowed to leave the deleted state. When the
/// id is unknown to the unified table, the legacy adapter is consulted.
pub async fn restore_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Note>, ApiError> {
    let pool = state.pool()?;

    if db::get_note_by_id(pool, id).await?.is_some() {
        let note = db::update_status(pool, id, NoteStatus::Active)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Note {} not found", id)))?;
        broadcast_event(&state.note_broadcast, NoteEvent::Saved(note.clone()));
        return Ok(Json(note));
    }

    // Fallback: restore a legacy row and present it in the unified shape
    let legacy_note = legacy::restore(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Note {} not found", id)))?;
    Ok(Json(legacy_note.into_note(NoteStatus::Active)))
}

/// PUT /api/notes/{id}/like
pub async fn like_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Note>, ApiError> {
    let pool = state.pool()?;

    let note = db::increment_likes(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Note {} not found", id)))?;

    broadcast_event(&state.note_broadcast, NoteEvent::Saved(note.clone()));
    Ok(Json(note))
}

/// PUT /api/notes/{id}/dislike
///
/// Increments the counter; when it reaches the configured threshold the
/// note is removed and a deletion event is broadcast instead of an
/// update.
pub async fn dislike_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Note>, ApiError> {
    let pool = state.pool()?;

    let note = db::increment_dislikes(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Note {} not found", id)))?;

    if note.dislikes >= state.config.dislike_threshold {
        tracing::info!(
            "Note {} reached dislike threshold ({}), removing",
            id,
            state.config.dislike_threshold
        );
        db::delete_note(pool, id).await?;
        broadcast_event(&state.note_broadcast, NoteEvent::Deleted(id));
    } else {
        broadcast_event(&state.note_broadcast, NoteEvent::Saved(note.clone()));
    }

    Ok(Json(note))
}

/// DELETE /api/notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let pool = state.pool()?;

    if !db::delete_note(pool, id).await? {
        return Err(ApiError::not_found(format!("Note {} not found", id)));
    }

    broadcast_event(&state.note_broadcast, NoteEvent::Deleted(id));
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/notes/by-status - the caller's notes in a given state
///
/// When the unified table has no rows for the caller, the legacy
/// adapter is consulted and its rows are mapped into the unified shape.
pub async fn notes_by_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<ByStatusParams>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let pool = state.pool()?;
    let status = parse_status(&params.status)?;
    let board = resolve_board_param(params.board_type.as_deref())?;

    let filter = NoteFilter {
        username: Some(user.username.clone()),
        board_type: board,
        is_private: None,
        status: Some(status),
    };

    let notes = db::list_notes(pool, &filter).await?;
    if !notes.is_empty() {
        return Ok(Json(notes));
    }

    // Documented fallback: read the pre-migration table
    let done = matches!(status, NoteStatus::Done | NoteStatus::Deleted);
    let legacy_rows = legacy::find_for_user(pool, &user.username, done, board).await?;
    let mapped = legacy_rows
        .into_iter()
        .map(|row| row.into_note(status))
        .collect();

    Ok(Json(mapped))
}

/// GET /api/notes/statuses - distinct status values present
pub async fn note_statuses(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let pool = state.pool()?;
    let statuses = db::distinct_statuses(pool).await?;
    Ok(Json(statuses))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults_board_and_privacy() {
        let request = CreateNoteRequest {
            title: None,
            text: "buy milk".to_string(),
            x: 10,
            y: 20,
            username: "alice".to_string(),
            is_private: None,
            board_type: None,
            color: None,
        };

        let new_note = request.into_new_note();
        assert_eq!(new_note.board_type, BoardType::Main);
        assert!(!new_note.is_private);
        assert_eq!(new_note.status, NoteStatus::Active);
        assert_eq!(new_note.color, DEFAULT_NOTE_COLOR);
    }

    #[test]
    fn test_create_invalid_board_falls_back_to_main() {
        let request = CreateNoteRequest {
            title: None,
            text: "x".to_string(),
            x: 0,
            y: 0,
            username: "alice".to_string(),
            is_private: Some(true),
            board_type: Some("sideways".to_string()),
            color: Some(String::new()),
        };

        let new_note = request.into_new_note();
        assert_eq!(new_note.board_type, BoardType::Main);
        assert!(new_note.is_private);
        assert_eq!(new_note.color, DEFAULT_NOTE_COLOR);
    }

    #[test]
    fn test_create_request_parses_camel_case() {
        let request: CreateNoteRequest = serde_json::from_value(serde_json::json!({
            "text": "buy milk",
            "username": "alice",
            "x": 1,
            "y": 2,
            "boardType": "profile",
            "isPrivate": true
        }))
        .unwrap();

        let new_note = request.into_new_note();
        assert_eq!(new_note.board_type, BoardType::Profile);
        assert!(new_note.is_private);
    }

    #[test]
    fn test_resolve_board_param() {
        assert_eq!(resolve_board_param(None).unwrap(), None);
        assert_eq!(resolve_board_param(Some("all")).unwrap(), None);
        assert_eq!(
            resolve_board_param(Some("main")).unwrap(),
            Some(BoardType::Main)
        );
        assert_eq!(
            resolve_board_param(Some("Profile")).unwrap(),
            Some(BoardType::Profile)
        );
        assert!(resolve_board_param(Some("sideways")).is_err());
    }

    #[test]
    fn test_parse_status_rejects_unknown() {
        assert!(parse_status("done").is_ok());
        assert!(parse_status("archived").is_err());
    }
}
