/**
 * Session Management and JWT Tokens
 *
 * This module handles token generation and validation for user sessions.
 * Both access and refresh tokens are HS256-signed JWTs carrying the
 * username as subject; only their lifetimes differ. There is no server
 * side revocation list: a token stays valid until it expires.
 */
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::backend::server::config::ServerConfig;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
    /// Issued at time (Unix timestamp, seconds)
    pub iat: i64,
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn create_token(
    username: &str,
    secret: &str,
    window_ms: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = now_secs();
    let claims = Claims {
        sub: username.to_string(),
        exp: now + window_ms / 1000,
        iat: now,
    };

    let key = EncodingKey::from_secret(secret.as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Create a short-lived access token for a user
pub fn create_access_token(
    username: &str,
    config: &ServerConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    create_token(username, &config.jwt_secret, config.jwt_expiration_ms)
}

/// Create a longer-lived refresh token for a user
pub fn create_refresh_token(
    username: &str,
    config: &ServerConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    create_token(
        username,
        &config.jwt_secret,
        config.jwt_refresh_expiration_ms,
    )
}

/// Verify and decode a token
///
/// Expiry is enforced exactly (no leeway), so a token minted with a
/// negative window is rejected immediately.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_ref());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

/// Validate a token, collapsing all failure modes to a boolean
///
/// Each failure mode is logged distinctly (malformed, expired,
/// unsupported, empty) but callers only learn valid/invalid.
pub fn validate_token(token: &str, secret: &str) -> bool {
    if token.is_empty() {
        tracing::warn!("JWT claims string is empty");
        return false;
    }

    match verify_token(token, secret) {
        Ok(_) => true,
        Err(e) => {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => tracing::warn!("Expired JWT token: {}", e),
                ErrorKind::InvalidToken => tracing::warn!("Invalid JWT token: {}", e),
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    tracing::warn!("Unsupported JWT token: {}", e)
                }
                _ => tracing::warn!("Error validating JWT token: {}", e),
            }
            false
        }
    }
}

/// Extract the username from a token
pub fn get_username_from_token(token: &str, secret: &str) -> Result<String, String> {
    let claims =
        verify_token(token, secret).map_err(|e| format!("Token verification failed: {}", e))?;
    Ok(claims.sub)
}
