/**
 * Stripe Billing Client
 *
 * Thin wrapper over the Stripe REST API: checkout sessions, customer
 * portal sessions, customers, and subscription retrieval/cancellation.
 * Every call is a direct pass-through; the only local logic is the
 * up-front configured-key check.
 *
 * Stripe-side failures surface as validation errors (400 with an
 * `error` body), a missing key as a 503 configuration error.
 */
use serde::Deserialize;
use std::time::Duration;

use crate::backend::error::ApiError;

const DEFAULT_API_BASE: &str = "https://api.stripe.com/v1";

/// A created checkout session
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

/// A created billing-portal session
#[derive(Debug, Clone, Deserialize)]
pub struct PortalSession {
    pub url: String,
}

/// Subscription details as returned to the API surface
#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub status: String,
    pub customer: Option<String>,
    pub current_period_end: Option<i64>,
    #[serde(default)]
    pub cancel_at_period_end: bool,
}

/// HTTP client for the Stripe API
#[derive(Debug, Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: Option<String>,
    api_base: String,
}

impl StripeClient {
    /// Create a client from the configured secret key
    pub fn new(secret_key: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        if secret_key.is_none() {
            tracing::warn!("[Stripe] Secret key not configured, billing disabled");
        }

        Self {
            http,
            secret_key,
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
        self.secret_key.is_some()
    }

    fn key(&self) -> Result<&str, ApiError> {
        self.secret_key.as_deref().ok_or_else(|| {
            ApiError::unavailable(
                "Stripe is not configured. Please set STRIPE_SECRET_KEY environment variable.",
            )
        })
    }

    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let key = self.key()?;
        let url = format!("{}{}", self.api_base, path);

        let response = self
            .http
            .post(&url)
            .bearer_auth(key)
            .form(form)
            .send()
            .await
            .map_err(|e| ApiError::internal(format!("Stripe request failed: {}", e)))?;

        Self::read_json(response).await
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::internal(format!("Stripe response read failed: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| {
                    v["error"]["message"]
                        .as_str()
                        .map(|s| s.to_string())
                })
                .unwrap_or_else(|| format!("HTTP {}", status));
            tracing::warn!("[Stripe] API error: {}", message);
            return Err(ApiError::validation(message));
        }

        serde_json::from_str(&text)
            .map_err(|e| ApiError::internal(format!("Stripe response parse failed: {}", e)))
    }

    /// Create a subscription-mode checkout session
    pub async fn create_checkout_session(
        &self,
        price_id: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, ApiError> {
        self.post_form(
            "/checkout/sessions",
            &[
                ("mode", "subscription"),
                ("success_url", success_url),
                ("cancel_url", cancel_url),
                ("line_items[0][price]", price_id),
                ("line_items[0][quantity]", "1"),
            ],
        )
        .await
    }

    /// Create a customer-portal session
    pub async fn create_customer_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<PortalSession, ApiError> {
        self.post_form(
            "/billing_portal/sessions",
            &[("customer", customer_id), ("return_url", return_url)],
        )
        .await
    }

    /// Create a customer, returning its id
    pub async fn create_customer(&self, email: &str, name: &str) -> Result<String, ApiError> {
        #[derive(Deserialize)]
        struct Customer {
            id: String,
        }

        let customer: Customer = self
            .post_form("/customers", &[("email", email), ("name", name)])
            .await?;
        Ok(customer.id)
    }

    /// Fetch subscription details
    pub async fn get_subscription(&self, subscription_id: &str) -> Result<Subscription, ApiError> {
        let key = self.key()?;
        let url = format!("{}/subscriptions/{}", self.api_base, subscription_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(key)
            .send()
            .await
            .map_err(|e| ApiError::internal(format!("Stripe request failed: {}", e)))?;

        Self::read_json(response).await
    }

    /// Cancel a subscription, returning whether it ended up canceled
    pub async fn cancel_subscription(&self, subscription_id: &str) -> Result<bool, ApiError> {
        let key = self.key()?;
        let url = format!("{}/subscriptions/{}", self.api_base, subscription_id);

        let response = self
            .http
            .delete(&url)
            .bearer_auth(key)
            .send()
            .await
            .map_err(|e| ApiError::internal(format!("Stripe request failed: {}", e)))?;

        let subscription: Subscription = Self::read_json(response).await?;
        Ok(subscription.status == "canceled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn configured(server: &MockServer) -> StripeClient {
        StripeClient::new(Some("sk_test_123".to_string())).with_api_base(server.uri())
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let client = StripeClient::new(None);
        assert!(!client.is_available());

        let err = client
            .create_checkout_session("price_1", "https://ok", "https://no")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_create_checkout_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/checkout/sessions"))
            .and(body_string_contains("mode=subscription"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "cs_test_1",
                "url": "https://checkout.stripe.com/pay/cs_test_1"
            })))
            .mount(&server)
            .await;

        let session = configured(&server)
            .create_checkout_session("price_1", "https://ok", "https://no")
            .await
            .unwrap();
        assert_eq!(session.id, "cs_test_1");
        assert!(session.url.unwrap().contains("checkout.stripe.com"));
    }

    #[tokio::test]
    async fn test_create_customer_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/customers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "cus_42"
            })))
            .mount(&server)
            .await;

        let id = configured(&server)
            .create_customer("alice@example.com", "Alice")
            .await
            .unwrap();
        assert_eq!(id, "cus_42");
    }

    #[tokio::test]
    async fn test_cancel_subscription_checks_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/subscriptions/sub_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "sub_1",
                "status": "canceled"
            })))
            .mount(&server)
            .await;

        assert!(configured(&server).cancel_subscription("sub_1").await.unwrap());
    }

    #[tokio::test]
    async fn test_api_error_surfaces_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/subscriptions/sub_missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": { "message": "No such subscription: sub_missing" }
            })))
            .mount(&server)
            .await;

        let err = configured(&server)
            .get_subscription("sub_missing")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("No such subscription"));
    }
}
