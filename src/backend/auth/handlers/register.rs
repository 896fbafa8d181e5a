/**
 * Registration Handlers
 *
 * Two registration entry points exist on the API surface:
 *
 * - POST /api/auth/register - plain registration body
 * - POST /api/registration/register - registration-form variant that
 *   also validates the password confirmation field
 *
 * Both check uniqueness before touching the table: a duplicate
 * username or email yields 400 and no insert is performed.
 */
use axum::{
    extract::{Path, State},
    Json,
};
use std::collections::BTreeSet;

use crate::backend::auth::handlers::types::{RegisterRequest, RegistrationFormRequest};
use crate::backend::auth::users::{create_user, exists_by_email, exists_by_username, Role};
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

async fn register_checked(
    state: &AppState,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    let pool = state.pool()?;

    if exists_by_username(pool, username).await? {
        tracing::warn!("Registration rejected, username taken: {}", username);
        return Err(ApiError::validation("Username already taken"));
    }
    if exists_by_email(pool, email).await? {
        tracing::warn!("Registration rejected, email in use: {}", email);
        return Err(ApiError::validation("Email is already in use"));
    }

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::internal(format!("Password hashing error: {}", e)))?;

    let roles = BTreeSet::from([Role::User]);
    let user = create_user(pool, username, email, &password_hash, &roles).await?;
    tracing::info!("User registered: {} (id {})", user.username, user.id);

    Ok(())
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if request.username.trim().is_empty() {
        return Err(ApiError::validation("Username is required"));
    }

    register_checked(&state, &request.username, &request.email, &request.password).await?;
    Ok(Json(serde_json::json!({
        "message": "User registered successfully!"
    })))
}

/// POST /api/registration/register
pub async fn register_form(
    State(state): State<AppState>,
    Json(request): Json<RegistrationFormRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if request.password != request.confirm_password {
        return Err(ApiError::validation("Passwords do not match"));
    }

    register_checked(&state, &request.username, &request.email, &request.password).await?;
    Ok(Json(serde_json::json!({
        "message": "User registered successfully"
    })))
}

/// GET /api/registration/check-username/{username}
///
/// Returns a bare boolean: true when the username is still available.
pub async fn check_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<bool>, ApiError> {
    let pool = state.pool()?;
    let taken = exists_by_username(pool, &username).await?;
    Ok(Json(!taken))
}
