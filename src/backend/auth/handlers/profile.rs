/**
 * Profile Handler
 *
 * GET /api/profile returns the authenticated user's account data plus
 * the number of notes they own.
 */
use axum::{extract::State, Json};

use crate::backend::auth::handlers::types::ProfileResponse;
use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::notes::db::count_by_username;
use crate::backend::server::state::AppState;

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let pool = state.pool()?;

    let record = get_user_by_username(pool, &user.username)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let notes_count = count_by_username(pool, &record.username).await?;

    let roles = record
        .role_set()
        .iter()
        .map(|r| r.as_str().to_string())
        .collect();
    Ok(Json(ProfileResponse {
        username: record.username,
        email: record.email,
        roles,
        notes_count,
    }))
}
