/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server: configuration parsing, database loading, state creation and
 * route configuration.
 *
 * # Initialization Process
 *
 * 1. Parse configuration from the environment
 * 2. Create the note event broadcast channel
 * 3. Load the optional database (and run migrations)
 * 4. Construct the external API clients
 * 5. Create and configure the router
 *
 * # Error Handling
 *
 * The function is designed to be resilient: a missing database or
 * unconfigured external key disables that service and the server
 * starts anyway, answering 503 where the service would be needed.
 */
use axum::Router;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::backend::ai::gemini::GeminiClient;
use crate::backend::billing::stripe::StripeClient;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;
use crate::shared::NoteEvent;

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing Stickyboard backend server");

    let config = Arc::new(ServerConfig::from_env());

    // Capacity of 1000 events is ample for board-change traffic
    let (note_broadcast, _) = broadcast::channel::<NoteEvent>(1000);
    tracing::info!("Note broadcast channel initialized");

    let db_pool = load_database().await;

    let gemini = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone());
    let stripe = StripeClient::new(config.stripe_secret_key.clone());

    let app_state = AppState {
        db_pool,
        note_broadcast,
        config,
        gemini,
        stripe,
    };

    let app = create_router(app_state);
    tracing::info!("Router configured");

    app
}
