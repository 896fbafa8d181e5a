/**
 * Gemini AI Client
 *
 * This module integrates with Google's Gemini generateContent API. The
 * local responsibility is request shaping, response text extraction, and
 * error translation; generation itself is entirely the external API's.
 *
 * # Configuration
 *
 * The client is constructed from `GEMINI_API_KEY` and `GEMINI_MODEL`.
 * Without a key the client reports itself unavailable and every call
 * yields a 503-class error instead of failing startup.
 */
use serde_json::json;
use std::time::Duration;

use crate::backend::error::ApiError;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for the Gemini generateContent API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_base: String,
}

impl GeminiClient {
    /// Create a client from configuration values
    pub fn new(api_key: Option<String>, model: String) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        if api_key.is_none() {
            tracing::warn!("[Gemini] API key not configured, AI chat disabled");
        } else {
            tracing::info!("[Gemini] Client initialized with model {}", model);
        }

        Self {
            http,
            api_key,
            model,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (tests)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Whether a key is configured
    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    /// Model this client generates with
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate content for a prompt
    ///
    /// # Errors
    ///
    /// * `ServiceUnavailable` - no API key configured
    /// * `Internal` - HTTP error from the API or unparseable response
    pub async fn generate_content(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, ApiError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ApiError::unavailable("Gemini API key not configured"))?;

        tracing::info!(
            "[Gemini] Sending request, prompt length {}, model {}",
            prompt.len(),
            self.model
        );

        let mut body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ],
            "generationConfig": {
                "temperature": 0.7,
                "maxOutputTokens": 1000
            }
        });
        if let Some(instruction) = system_instruction {
            body["systemInstruction"] = json!({
                "parts": [ { "text": instruction } ]
            });
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model, api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::internal(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::internal(format!("Gemini response read failed: {}", e)))?;

        if !status.is_success() {
            tracing::error!("[Gemini] HTTP error {}: {}", status, text);
            return Err(ApiError::internal(format!("HTTP {}: {}", status, text)));
        }

        let value: serde_json::Value = serde_json::from_str(&text)?;
        let generated = value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| ApiError::internal("Failed to parse Gemini response"))?;

        tracing::info!("[Gemini] Response length {}", generated.len());
        Ok(generated.to_string())
    }

    /// Generate AI-powered suggestions from a user's note texts
    pub async fn generate_note_suggestions(&self, user_notes: &str) -> Result<String, ApiError> {
        let prompt = format!(
            "Based on the following notes, provide 3-5 actionable suggestions for the user:\n\n\
             User Notes:\n{}\n\n\
             Keep each suggestion short and practical.",
            user_notes
        );
        self.generate_content(&prompt, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_unconfigured_key_is_service_unavailable() {
        let client = GeminiClient::new(None, "gemini-2.0-flash".to_string());
        assert!(!client.is_available());

        let err = client.generate_content("hello", None).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_generate_content_extracts_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [ { "text": "Try grouping your errands." } ] } }
                ]
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(Some("test-key".to_string()), "gemini-2.0-flash".to_string())
            .with_api_base(server.uri());

        let text = client.generate_content("organize my notes", None).await.unwrap();
        assert_eq!(text, "Try grouping your errands.");
    }

    #[tokio::test]
    async fn test_http_error_is_internal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(Some("test-key".to_string()), "gemini-2.0-flash".to_string())
            .with_api_base(server.uri());

        let err = client.generate_content("hello", None).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unparseable_response_is_internal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": []
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(Some("test-key".to_string()), "gemini-2.0-flash".to_string())
            .with_api_base(server.uri());

        let err = client.generate_content("hello", None).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
