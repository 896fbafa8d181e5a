/**
 * Login Handler
 *
 * This module implements the user authentication handler for
 * POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username
 * 2. Verify password using bcrypt
 * 3. Generate access and refresh tokens
 * 4. Return tokens and user info
 *
 * # Security
 *
 * - Invalid credentials return 401 Unauthorized with no token fields
 * - Unknown user and wrong password yield the same error (no user
 *   enumeration)
 * - Passwords are never logged or returned in responses
 */
use axum::{extract::State, Json};
use bcrypt::verify;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::{create_access_token, create_refresh_token};
use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - unknown user or wrong password
/// * `503 Service Unavailable` - database not configured
/// * `500 Internal Server Error` - database or token generation failure
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let pool = state.pool()?;
    tracing::info!("Login request for: {}", request.username);

    let user = get_user_by_username(pool, &request.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", request.username);
            ApiError::unauthorized("Invalid username or password")
        })?;

    let valid = verify(&request.password, &user.password_hash)
        .map_err(|e| ApiError::internal(format!("Password verification error: {}", e)))?;

    if !valid {
        tracing::warn!("Invalid password for user: {}", request.username);
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let token = create_access_token(&user.username, &state.config)
        .map_err(|e| ApiError::internal(format!("Failed to create token: {}", e)))?;
    let refresh_token = create_refresh_token(&user.username, &state.config)
        .map_err(|e| ApiError::internal(format!("Failed to create refresh token: {}", e)))?;

    tracing::info!("User logged in successfully: {}", user.username);

    let roles = user.role_set().iter().map(|r| r.as_str().to_string()).collect();
    Ok(Json(AuthResponse {
        token,
        refresh_token,
        id: user.id,
        username: user.username,
        email: user.email,
        roles,
    }))
}
