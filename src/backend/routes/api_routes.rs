/**
 * API Route Configuration
 *
 * This module wires every `/api` endpoint to its handler.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/login` - User login
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/refreshtoken` - Mint a fresh token pair
 * - `POST /api/registration/register` - Registration form variant
 * - `GET /api/registration/check-username/{username}` - Availability check
 * - `GET /api/profile` - Authenticated profile view
 *
 * ## Notes
 * - `GET/POST /api/notes`, `GET/PUT/DELETE /api/notes/{id}` and the
 *   done/like/dislike/status/position/restore operations
 * - `GET /api/notes/sse` - Live update stream
 *
 * ## Boards, payments, AI
 * - `/api/board/...`, `/api/payments/...`, `/api/ai/...`
 */
use axum::Router;

use crate::backend::ai::handlers as ai;
use crate::backend::auth::handlers::{
    check_username, get_profile, login, refresh_token, register, register_form,
};
use crate::backend::billing::handlers as payments;
use crate::backend::boards::handlers as boards;
use crate::backend::notes::handlers as notes;
use crate::backend::realtime::subscription::handle_note_subscription;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// Public routes (board reads, auth, registration) and authenticated
/// routes (profile, boards, by-status views) live on the same router;
/// the extractors enforce authentication where it is required.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/api/auth/login", axum::routing::post(login))
        .route("/api/auth/register", axum::routing::post(register))
        .route("/api/auth/refreshtoken", axum::routing::post(refresh_token))
        // Registration endpoints
        .route("/api/registration/register", axum::routing::post(register_form))
        .route(
            "/api/registration/check-username/{username}",
            axum::routing::get(check_username),
        )
        // Profile endpoint
        .route("/api/profile", axum::routing::get(get_profile))
        // Notes endpoints
        .route(
            "/api/notes",
            axum::routing::get(notes::list_notes).post(notes::create_note),
        )
        .route("/api/notes/sse", axum::routing::get(handle_note_subscription))
        .route("/api/notes/by-status", axum::routing::get(notes::notes_by_status))
        .route("/api/notes/statuses", axum::routing::get(notes::note_statuses))
        .route(
            "/api/notes/{id}",
            axum::routing::get(notes::get_note)
                .put(notes::move_note)
                .delete(notes::delete_note),
        )
        .route("/api/notes/{id}/done", axum::routing::put(notes::mark_done))
        .route("/api/notes/{id}/like", axum::routing::put(notes::like_note))
        .route("/api/notes/{id}/dislike", axum::routing::put(notes::dislike_note))
        .route("/api/notes/{id}/status", axum::routing::patch(notes::update_status))
        .route("/api/notes/{id}/position", axum::routing::patch(notes::patch_position))
        .route("/api/notes/{id}/restore", axum::routing::post(notes::restore_note))
        .route("/api/notes/profile/{username}", axum::routing::get(notes::profile_notes))
        .route("/api/notes/user/{username}", axum::routing::get(notes::user_notes))
        .route(
            "/api/notes/user/{username}/private",
            axum::routing::get(notes::user_private_notes),
        )
        .route(
            "/api/notes/user/{username}/public",
            axum::routing::get(notes::user_public_notes),
        )
        // Board endpoints
        .route("/api/board/create", axum::routing::post(boards::create))
        .route("/api/board/mine", axum::routing::get(boards::mine))
        // Payment endpoints
        .route(
            "/api/payments/create-checkout-session",
            axum::routing::post(payments::create_checkout_session),
        )
        .route(
            "/api/payments/create-customer-portal",
            axum::routing::post(payments::create_customer_portal),
        )
        .route(
            "/api/payments/create-customer",
            axum::routing::post(payments::create_customer),
        )
        .route(
            "/api/payments/subscription/{subscription_id}",
            axum::routing::get(payments::subscription_details),
        )
        .route(
            "/api/payments/cancel-subscription/{subscription_id}",
            axum::routing::post(payments::cancel_subscription),
        )
        .route("/api/payments/tiers", axum::routing::get(payments::tiers))
        // AI endpoints
        .route("/api/ai/notes", axum::routing::post(ai::create_note))
        .route("/api/ai/scan", axum::routing::get(ai::scan))
        .route("/api/ai/old-notes", axum::routing::get(ai::old_notes))
        .route("/api/ai/suggestions", axum::routing::get(ai::suggestions))
        .route("/api/ai/gemini-chat", axum::routing::post(ai::gemini_chat))
        .route(
            "/api/ai/gemini-suggestions",
            axum::routing::get(ai::gemini_suggestions),
        )
        .route("/api/ai/health", axum::routing::get(ai::health))
}
