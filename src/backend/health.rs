/**
 * Diagnostics Handlers
 *
 * The `/health` and `/test` endpoints used by deploy checks. The health
 * report masks credentials embedded in the database URL before echoing
 * it.
 */
use axum::{extract::State, Json};

use crate::backend::server::state::AppState;

/// Mask a password embedded in a connection string
pub fn mask_sensitive(input: &str) -> String {
    match input.split_once("password=") {
        Some((head, tail)) => {
            let rest = tail.split_once('&').map(|(_, r)| r);
            match rest {
                Some(rest) => format!("{}password=*****&{}", head, rest),
                None => format!("{}password=*****", head),
            }
        }
        None => input.to_string(),
    }
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let port = std::env::var("SERVER_PORT").unwrap_or_else(|_| "3000".to_string());
    let database_url = std::env::var("DATABASE_URL")
        .ok()
        .map(|url| mask_sensitive(&url));

    Json(serde_json::json!({
        "status": "UP",
        "serverPort": port,
        "services": {
            "database": state.db_pool.is_some(),
            "gemini": state.gemini.is_available(),
            "stripe": state.stripe.is_available(),
        },
        "environment": {
            "DATABASE_URL": database_url,
        }
    }))
}

/// GET /test
pub async fn test_endpoint() -> Json<serde_json::Value> {
    let port = std::env::var("SERVER_PORT").unwrap_or_else(|_| "3000".to_string());
    Json(serde_json::json!({
        "message": "Test endpoint is working!",
        "port": port,
    }))
}
