/**
 * AI Handlers
 *
 * HTTP endpoint handlers under `/api/ai`: assisted note creation, the
 * scan analysis, old-note and suggestion views, and the Gemini chat
 * pass-throughs.
 */
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::backend::ai::agent;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::MaybeAuthUser;
use crate::backend::realtime::broadcast::broadcast_event;
use crate::backend::server::state::AppState;
use crate::shared::note::Note;
use crate::shared::NoteEvent;

/// Body for AI-assisted note creation
#[derive(Debug, Clone, Deserialize)]
pub struct AiNoteRequest {
    pub text: String,
}

/// Body for Gemini chat
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiChatRequest {
    pub prompt: String,
    #[serde(default)]
    pub system_instruction: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OldNotesParams {
    #[serde(default = "default_days_old")]
    pub days_old: i64,
}

fn default_days_old() -> i64 {
    7
}

/// POST /api/ai/notes - create a note with AI assistance
pub async fn create_note(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Json(request): Json<AiNoteRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let pool = state.pool()?;

    if request.text.trim().is_empty() {
        return Err(ApiError::validation("Note text cannot be empty"));
    }

    let username = user.username_or_anonymous();
    let note = agent::create_note_with_ai(pool, &request.text, &username).await?;

    broadcast_event(&state.note_broadcast, NoteEvent::Saved(note.clone()));
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/ai/scan - analyze the caller's notes
pub async fn scan(
    State(state): State<AppState>,
    user: MaybeAuthUser,
) -> Result<Json<agent::ScanReport>, ApiError> {
    let pool = state.pool()?;

    let username = user.0.as_ref().map(|u| u.username.as_str());
    let notes = agent::notes_for_analysis(pool, username).await?;
    tracing::info!(
        "[AI] Scanning {} notes for {}",
        notes.len(),
        username.unwrap_or("anonymous")
    );

    Ok(Json(agent::scan_notes(&notes)))
}

/// GET /api/ai/old-notes - incomplete notes older than daysOld
pub async fn old_notes(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Query(params): Query<OldNotesParams>,
) -> Result<Json<Vec<agent::NoteSummary>>, ApiError> {
    let pool = state.pool()?;

    let username = user.0.as_ref().map(|u| u.username.as_str());
    let notes = agent::notes_for_analysis(pool, username).await?;
    Ok(Json(agent::old_notes(&notes, params.days_old, Utc::now())))
}

/// GET /api/ai/suggestions - template suggestions from note patterns
pub async fn suggestions(
    State(state): State<AppState>,
    user: MaybeAuthUser,
) -> Result<Json<Vec<String>>, ApiError> {
    let pool = state.pool()?;

    let username = user.0.as_ref().map(|u| u.username.as_str());
    let notes = agent::notes_for_analysis(pool, username).await?;
    Ok(Json(agent::note_suggestions(&notes)))
}

/// POST /api/ai/gemini-chat - generative chat pass-through
pub async fn gemini_chat(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Json(request): Json<GeminiChatRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.gemini.is_available() {
        return Err(ApiError::unavailable("Gemini AI service not available"));
    }

    tracing::info!("[AI] Gemini chat for {}", user.username_or_anonymous());

    let text = state
        .gemini
        .generate_content(&request.prompt, request.system_instruction.as_deref())
        .await?;

    Ok(Json(serde_json::json!({
        "text": text,
        "model": state.gemini.model(),
        "source": "gemini-ai",
    })))
}

/// GET /api/ai/gemini-suggestions - generative suggestions over the
/// caller's notes
pub async fn gemini_suggestions(
    State(state): State<AppState>,
    user: MaybeAuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.gemini.is_available() {
        return Err(ApiError::unavailable("Gemini AI service not available"));
    }

    let pool = state.pool()?;
    let username = user.0.as_ref().map(|u| u.username.as_str());
    let notes = agent::notes_for_analysis(pool, username).await?;

    let context = if notes.is_empty() {
        "The user has no notes yet.".to_string()
    } else {
        notes
            .iter()
            .map(|n| format!("- {}", n.text))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let suggestions = state.gemini.generate_note_suggestions(&context).await?;

    Ok(Json(serde_json::json!({
        "suggestions": suggestions,
        "model": state.gemini.model(),
        "source": "gemini-ai",
    })))
}

/// GET /api/ai/health - AI service availability report
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "services": {
            "aiAgentService": "operational",
            "geminiService": {
                "available": state.gemini.is_available(),
                "model": state.gemini.model(),
            },
            "database": if state.db_pool.is_some() { "connected" } else { "unconfigured" },
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_old_notes_params_default() {
        let params: OldNotesParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(params.days_old, 7);

        let params: OldNotesParams =
            serde_json::from_value(serde_json::json!({ "daysOld": 30 })).unwrap();
        assert_eq!(params.days_old, 30);
    }

    #[test]
    fn test_gemini_chat_request_parses_system_instruction() {
        let request: GeminiChatRequest = serde_json::from_value(serde_json::json!({
            "prompt": "hello",
            "systemInstruction": "be terse"
        }))
        .unwrap();
        assert_eq!(request.system_instruction.as_deref(), Some("be terse"));
    }
}
