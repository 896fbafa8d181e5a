//! Router Configuration
//!
//! This module provides the main router creation function that combines
//! the API routes, diagnostics endpoints, the CORS layer and the
//! fallback handler into a single Axum router.
//!
//! # CORS
//!
//! Allowed origins come from configuration: exact origins plus entries
//! of the form `https://*.domain` which match any subdomain of that
//! domain over the given scheme. Credentials are allowed, which is why
//! origins are matched by predicate rather than a wildcard.
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::backend::health::{health_check, test_endpoint};
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Whether an origin is covered by the configured allow-list
///
/// An entry like `https://*.run.app` matches any origin with the same
/// scheme whose host is a subdomain of `run.app`; other entries match
/// exactly.
pub fn origin_allowed(origin: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|entry| {
        if let Some((scheme, suffix)) = entry.split_once('*') {
            // suffix keeps its leading dot, so apex and lookalike
            // domains do not match
            origin.starts_with(scheme)
                && origin.ends_with(suffix)
                && origin.len() > scheme.len() + suffix.len()
        } else {
            origin == entry
        }
    })
}

fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let predicate = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        origin
            .to_str()
            .map(|origin| origin_allowed(origin, &allowed_origins))
            .unwrap_or(false)
    });

    CorsLayer::new()
        .allow_origin(predicate)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the database pool,
///   broadcast channel, configuration and external clients
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let cors = cors_layer(app_state.config.cors_allowed_origins.clone());

    let router = Router::new()
        // Diagnostics
        .route("/health", axum::routing::get(health_check))
        .route("/test", axum::routing::get(test_endpoint));

    // Add API routes
    let router = configure_api_routes(router);

    // Fallback handler for 404
    let router = router.fallback(|| async { "404 Not Found" });

    router.layer(cors).with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec![
            "http://localhost:5173".to_string(),
            "https://*.run.app".to_string(),
        ]
    }

    #[test]
    fn test_exact_origin_matches() {
        assert!(origin_allowed("http://localhost:5173", &allowed()));
        assert!(!origin_allowed("http://localhost:9999", &allowed()));
    }

    #[test]
    fn test_wildcard_matches_subdomains() {
        assert!(origin_allowed(
            "https://sticky-frontend-abc123.run.app",
            &allowed()
        ));
        assert!(!origin_allowed("http://sticky.run.app", &allowed()));
    }

    #[test]
    fn test_wildcard_requires_subdomain() {
        // The bare apex is not covered by the wildcard entry
        assert!(!origin_allowed("https://run.app", &allowed()));
    }

    #[test]
    fn test_unrelated_origin_rejected() {
        assert!(!origin_allowed("https://evil.example", &allowed()));
        assert!(!origin_allowed("https://evilrun.app", &allowed()));
    }
}
