/**
 * Authentication Middleware
 *
 * This module provides the request-scoped identity used by protected
 * routes. It extracts and verifies bearer tokens from the Authorization
 * header and hands the authenticated username to handlers.
 *
 * Two extractors are provided:
 * - `AuthUser` - rejects with 401 when the token is missing or invalid
 * - `MaybeAuthUser` - yields `None` for anonymous callers, used by
 *   endpoints that serve both signed-in and guest traffic
 */
use axum::http::{header::AUTHORIZATION, request::Parts, StatusCode};
use sqlx::PgPool;

use crate::backend::auth::sessions::verify_token;
use crate::backend::auth::users::get_user_by_username;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from a bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Pull the bearer token out of the Authorization header
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

async fn authenticate(parts: &Parts, state: &AppState) -> Result<AuthenticatedUser, StatusCode> {
    let token = bearer_token(parts).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        StatusCode::UNAUTHORIZED
    })?;

    let claims = verify_token(token, &state.config.jwt_secret).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        StatusCode::UNAUTHORIZED
    })?;

    // Verify the user still exists when a database is configured
    if let Some(pool) = &state.db_pool {
        if !user_exists(pool, &claims.sub).await {
            tracing::warn!("Token subject not found in database: {}", claims.sub);
            return Err(StatusCode::UNAUTHORIZED);
        }
    }

    Ok(AuthenticatedUser {
        username: claims.sub,
    })
}

async fn user_exists(pool: &PgPool, username: &str) -> bool {
    matches!(get_user_by_username(pool, username).await, Ok(Some(_)))
}

/// Axum extractor for a required authenticated user
///
/// Rejects the request with 401 Unauthorized when the Authorization
/// header is missing, malformed, or carries an invalid token.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).await.map(AuthUser)
    }
}

/// Axum extractor for an optional authenticated user
///
/// Yields `None` for anonymous callers (and for invalid tokens, which
/// are treated as anonymous on public endpoints).
#[derive(Clone, Debug)]
pub struct MaybeAuthUser(pub Option<AuthenticatedUser>);

impl MaybeAuthUser {
    /// The caller's username, or the anonymous placeholder
    pub fn username_or_anonymous(&self) -> String {
        self.0
            .as_ref()
            .map(|u| u.username.clone())
            .unwrap_or_else(|| "anonymous".to_string())
    }
}

impl axum::extract::FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if bearer_token(parts).is_none() {
            return Ok(MaybeAuthUser(None));
        }
        Ok(MaybeAuthUser(authenticate(parts, state).await.ok()))
    }
}
