/**
 * Board Handlers
 *
 * HTTP endpoint handlers for board creation and listing. Both routes
 * require an authenticated caller; the board is always owned by the
 * caller.
 */
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::backend::auth::users::get_user_by_username;
use crate::backend::boards::db::{create_board, find_by_user, Board};
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

/// Body for creating a board
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBoardRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// POST /api/board/create
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateBoardRequest>,
) -> Result<(StatusCode, Json<Board>), ApiError> {
    let pool = state.pool()?;

    if request.title.trim().is_empty() {
        return Err(ApiError::validation("Board title is required"));
    }

    let owner = get_user_by_username(pool, &user.username)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let board = create_board(pool, owner.id, &request.title, request.content.as_deref()).await?;
    tracing::info!("Board {} created for user {}", board.code, owner.username);

    Ok((StatusCode::CREATED, Json(board)))
}

/// GET /api/board/mine
pub async fn mine(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Board>>, ApiError> {
    let pool = state.pool()?;

    let owner = get_user_by_username(pool, &user.username)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let boards = find_by_user(pool, owner.id).await?;
    Ok(Json(boards))
}
