//! API surface smoke tests
//!
//! Router-level tests over a server with no database and no external
//! keys configured: route wiring, the auth guard, and the degraded-mode
//! (503) behavior of every service-backed endpoint.

use axum::http::StatusCode;
use axum_test::TestServer;
use std::sync::Arc;
use tokio::sync::broadcast;

use stickyboard::backend::ai::gemini::GeminiClient;
use stickyboard::backend::billing::stripe::StripeClient;
use stickyboard::backend::routes::router::create_router;
use stickyboard::backend::server::config::ServerConfig;
use stickyboard::backend::server::state::AppState;
use stickyboard::shared::NoteEvent;

fn test_config() -> ServerConfig {
    ServerConfig {
        jwt_secret: "smoke-test-secret".to_string(),
        jwt_expiration_ms: 60_000,
        jwt_refresh_expiration_ms: 600_000,
        dislike_threshold: 20,
        gemini_api_key: None,
        gemini_model: "gemini-2.0-flash".to_string(),
        stripe_secret_key: None,
        cors_allowed_origins: vec!["http://localhost:5173".to_string()],
    }
}

/// A server with no database pool and unconfigured external services
fn create_test_server() -> TestServer {
    let config = Arc::new(test_config());
    let (note_broadcast, _) = broadcast::channel::<NoteEvent>(16);

    let state = AppState {
        db_pool: None,
        note_broadcast,
        config: config.clone(),
        gemini: GeminiClient::new(None, config.gemini_model.clone()),
        stripe: StripeClient::new(None),
    };

    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_reports_unconfigured_services() {
    let server = create_test_server();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "UP");
    assert_eq!(body["services"]["database"], false);
    assert_eq!(body["services"]["gemini"], false);
    assert_eq!(body["services"]["stripe"], false);
}

#[tokio::test]
async fn test_test_endpoint_answers() {
    let server = create_test_server();

    let response = server.get("/test").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Test endpoint is working!");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = create_test_server();
    let response = server.get("/api/unknown").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_without_database_is_503() {
    let server = create_test_server();

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "username": "nouser",
            "password": "x"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    assert!(body.get("token").is_none());
    assert!(body.get("refreshToken").is_none());
}

#[tokio::test]
async fn test_notes_list_without_database_is_503() {
    let server = create_test_server();
    let response = server.get("/api/notes").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_profile_requires_token() {
    let server = create_test_server();
    let response = server.get("/api/profile").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_rejects_garbage_token() {
    let server = create_test_server();

    let response = server
        .get("/api/profile")
        .add_header("Authorization", "Bearer not.a.token")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_by_status_requires_token() {
    let server = create_test_server();
    let response = server.get("/api/notes/by-status?status=done").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_status_update_validates_before_storage() {
    let server = create_test_server();

    let response = server.patch("/api/notes/1/status?status=archived").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Unknown status"));
}

#[tokio::test]
async fn test_gemini_chat_without_key_is_503() {
    let server = create_test_server();

    let response = server
        .post("/api/ai/gemini-chat")
        .json(&serde_json::json!({ "prompt": "hello" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Gemini AI service not available"));
}

#[tokio::test]
async fn test_checkout_without_stripe_key_is_503() {
    let server = create_test_server();

    let response = server
        .post("/api/payments/create-checkout-session")
        .json(&serde_json::json!({
            "priceId": "price_1",
            "successUrl": "https://ok",
            "cancelUrl": "https://no"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_ai_health_reports_gemini_down() {
    let server = create_test_server();

    let response = server.get("/api/ai/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["services"]["geminiService"]["available"], false);
    assert_eq!(body["services"]["database"], "unconfigured");
}
