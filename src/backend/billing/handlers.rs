/**
 * Payment Handlers
 *
 * HTTP endpoint handlers under `/api/payments`, passing through to the
 * Stripe client. Stripe-side failures come back as 400 with an `error`
 * body; a missing secret key as 503.
 */
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::backend::billing::stripe::StripeClient;
use crate::backend::billing::tiers::{list_active_tiers, SubscriptionTier};
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Default portal return URL when the client does not send one
const DEFAULT_PORTAL_RETURN_URL: &str = "http://localhost:3000/account";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPortalRequest {
    pub customer_id: String,
    #[serde(default)]
    pub return_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerRequest {
    pub email: String,
    pub name: String,
}

/// POST /api/payments/create-checkout-session
pub async fn create_checkout_session(
    State(stripe): State<StripeClient>,
    Json(request): Json<CheckoutSessionRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session = stripe
        .create_checkout_session(&request.price_id, &request.success_url, &request.cancel_url)
        .await?;

    Ok(Json(serde_json::json!({
        "sessionId": session.id,
        "url": session.url,
    })))
}

/// POST /api/payments/create-customer-portal
pub async fn create_customer_portal(
    State(stripe): State<StripeClient>,
    Json(request): Json<CustomerPortalRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let return_url = request
        .return_url
        .unwrap_or_else(|| DEFAULT_PORTAL_RETURN_URL.to_string());

    let session = stripe
        .create_customer_portal_session(&request.customer_id, &return_url)
        .await?;

    Ok(Json(serde_json::json!({ "url": session.url })))
}

/// POST /api/payments/create-customer
pub async fn create_customer(
    State(stripe): State<StripeClient>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let customer_id = stripe.create_customer(&request.email, &request.name).await?;
    Ok(Json(serde_json::json!({ "customerId": customer_id })))
}

/// GET /api/payments/subscription/{subscriptionId}
pub async fn subscription_details(
    State(stripe): State<StripeClient>,
    Path(subscription_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let subscription = stripe.get_subscription(&subscription_id).await?;

    Ok(Json(serde_json::json!({
        "status": subscription.status,
        "currentPeriodEnd": subscription.current_period_end,
        "cancelAtPeriodEnd": subscription.cancel_at_period_end,
        "customer": subscription.customer,
    })))
}

/// POST /api/payments/cancel-subscription/{subscriptionId}
pub async fn cancel_subscription(
    State(stripe): State<StripeClient>,
    Path(subscription_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let cancelled = stripe.cancel_subscription(&subscription_id).await?;
    Ok(Json(serde_json::json!({ "cancelled": cancelled })))
}

/// GET /api/payments/tiers
pub async fn tiers(State(state): State<AppState>) -> Result<Json<Vec<SubscriptionTier>>, ApiError> {
    let pool = state.pool()?;
    let tiers = list_active_tiers(pool).await?;
    Ok(Json(tiers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_request_parses_camel_case() {
        let request: CheckoutSessionRequest = serde_json::from_value(serde_json::json!({
            "priceId": "price_1",
            "successUrl": "https://ok",
            "cancelUrl": "https://no"
        }))
        .unwrap();
        assert_eq!(request.price_id, "price_1");
    }

    #[test]
    fn test_portal_request_return_url_optional() {
        let request: CustomerPortalRequest =
            serde_json::from_value(serde_json::json!({ "customerId": "cus_1" })).unwrap();
        assert!(request.return_url.is_none());
    }
}
