/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration:
 * the optional PostgreSQL database connection and the environment-driven
 * settings for tokens, moderation, CORS and the external AI/billing APIs.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables, with sensible
 * defaults for local development when possible.
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup.
 * Services that fail to initialize are set to `None` and the server
 * continues without them, answering 503 where they would be needed.
 */
use sqlx::PgPool;

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Default dislike count at which a note is removed
pub const DEFAULT_DISLIKE_THRESHOLD: i32 = 20;

/// Environment-driven server settings
///
/// Parsed once at startup and shared through `AppState`. Optional keys
/// (Gemini, Stripe) stay `None` when unset; the owning service reports
/// itself unavailable instead of failing startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Shared secret for signing access and refresh tokens
    pub jwt_secret: String,
    /// Access token lifetime in milliseconds
    pub jwt_expiration_ms: i64,
    /// Refresh token lifetime in milliseconds
    pub jwt_refresh_expiration_ms: i64,
    /// Dislike count at which a note is removed
    pub dislike_threshold: i32,
    /// Gemini API key, if configured
    pub gemini_api_key: Option<String>,
    /// Gemini model name
    pub gemini_model: String,
    /// Stripe secret key, if configured
    pub stripe_secret_key: Option<String>,
    /// Allowed CORS origins (exact origins; `*.domain` entries match subdomains)
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using development default");
            "change-me-in-production".to_string()
        });

        // 24h access tokens, 7d refresh tokens by default
        let jwt_expiration_ms = env_i64("JWT_EXPIRATION_MS", 24 * 60 * 60 * 1000);
        let jwt_refresh_expiration_ms =
            env_i64("JWT_REFRESH_EXPIRATION_MS", 7 * 24 * 60 * 60 * 1000);

        let dislike_threshold = env_i64(
            "NOTE_DISLIKE_THRESHOLD",
            DEFAULT_DISLIKE_THRESHOLD as i64,
        ) as i32;

        let gemini_api_key = non_empty_env("GEMINI_API_KEY");
        let gemini_model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string());

        let stripe_secret_key = non_empty_env("STRIPE_SECRET_KEY");

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:5173".to_string(),
                    "http://localhost:5174".to_string(),
                    "https://*.run.app".to_string(),
                ]
            });

        Self {
            jwt_secret,
            jwt_expiration_ms,
            jwt_refresh_expiration_ms,
            dislike_threshold,
            gemini_api_key,
            gemini_model,
            stripe_secret_key,
            cors_allowed_origins,
        }
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(default)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load and initialize database connection pool
///
/// This function:
/// 1. Reads `DATABASE_URL` from environment
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if database is successfully configured
/// - `None` if `DATABASE_URL` is not set or connection fails
///
/// # Errors
///
/// Errors are logged but do not prevent server startup. The function
/// returns `None` on any error, allowing the server to run without
/// database features.
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {:?}", e);
            // Continue anyway - migrations might have already been run
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
