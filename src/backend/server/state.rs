/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container, holding:
 * - The optional database connection pool
 * - The process-wide note event broadcast channel
 * - Parsed server configuration
 * - The external Gemini and Stripe clients
 *
 * # Thread Safety
 *
 * All fields are cheap to clone and safe for concurrent access:
 * `broadcast::Sender` is thread-safe, `PgPool` is an internally shared
 * handle, and configuration is behind an `Arc`.
 */
use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::ai::gemini::GeminiClient;
use crate::backend::billing::stripe::StripeClient;
use crate::backend::error::ApiError;
use crate::backend::realtime::broadcast::NoteEventBroadcast;
use crate::backend::server::config::ServerConfig;

/// Application state shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// `None` if the database is not configured (e.g. `DATABASE_URL`
    /// unset). Handlers answer 503 in that case.
    pub db_pool: Option<PgPool>,

    /// Broadcast channel for notifying all SSE subscribers of note changes
    pub note_broadcast: NoteEventBroadcast,

    /// Parsed server configuration
    pub config: Arc<ServerConfig>,

    /// Gemini AI client
    pub gemini: GeminiClient,

    /// Stripe billing client
    pub stripe: StripeClient,
}

impl AppState {
    /// The database pool, or the 503 configuration error
    pub fn pool(&self) -> Result<&PgPool, ApiError> {
        self.db_pool
            .as_ref()
            .ok_or_else(ApiError::database_unavailable)
    }
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for NoteEventBroadcast {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.note_broadcast.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for GeminiClient {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.gemini.clone()
    }
}

impl FromRef<AppState> for StripeClient {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.stripe.clone()
    }
}
