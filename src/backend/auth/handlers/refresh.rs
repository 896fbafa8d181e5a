/**
 * Token Refresh Handler
 *
 * POST /api/auth/refreshtoken accepts a refresh token as a request
 * parameter, validates its signature and expiry, and mints a fresh
 * access/refresh pair for the token's subject. There is no server-side
 * token state: a stolen refresh token stays usable until it expires.
 */
use axum::{
    extract::{Query, State},
    Json,
};

use crate::backend::auth::handlers::types::{AuthResponse, RefreshParams};
use crate::backend::auth::sessions::{
    create_access_token, create_refresh_token, get_username_from_token, validate_token,
};
use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// POST /api/auth/refreshtoken?refreshToken=...
///
/// # Errors
///
/// * `401 Unauthorized` - missing, malformed, or expired refresh token,
///   or a subject that no longer exists
pub async fn refresh_token(
    State(state): State<AppState>,
    Query(params): Query<RefreshParams>,
) -> Result<Json<AuthResponse>, ApiError> {
    let pool = state.pool()?;

    if !validate_token(&params.refresh_token, &state.config.jwt_secret) {
        return Err(ApiError::unauthorized("Invalid refresh token"));
    }

    let username = get_username_from_token(&params.refresh_token, &state.config.jwt_secret)
        .map_err(|_| ApiError::unauthorized("Invalid refresh token"))?;

    let user = get_user_by_username(pool, &username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Refresh token subject not found: {}", username);
            ApiError::unauthorized("Invalid refresh token")
        })?;

    let token = create_access_token(&user.username, &state.config)
        .map_err(|e| ApiError::internal(format!("Failed to create token: {}", e)))?;
    let new_refresh_token = create_refresh_token(&user.username, &state.config)
        .map_err(|e| ApiError::internal(format!("Failed to create refresh token: {}", e)))?;

    tracing::info!("Tokens refreshed for user: {}", user.username);

    let roles = user.role_set().iter().map(|r| r.as_str().to_string()).collect();
    Ok(Json(AuthResponse {
        token,
        refresh_token: new_refresh_token,
        id: user.id,
        username: user.username,
        email: user.email,
        roles,
    }))
}
