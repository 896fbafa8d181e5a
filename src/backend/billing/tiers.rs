/**
 * Subscription Tiers
 *
 * Billing plan metadata rows: external price identifier, price,
 * interval, feature text and note cap. Config data maintained by hand,
 * exposed read-only through the payments surface.
 */
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A billing plan
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTier {
    pub id: i64,
    pub name: String,
    pub stripe_price_id: String,
    /// Price in the currency's minor unit
    pub price: i32,
    pub currency: String,
    /// Billing interval ("month" or "year")
    pub billing_interval: String,
    /// Feature description text
    pub features: Option<String>,
    /// Maximum number of notes the plan allows
    pub max_notes: i32,
    pub is_active: bool,
    pub sort_order: i32,
}

/// Active tiers in display order
pub async fn list_active_tiers(pool: &PgPool) -> Result<Vec<SubscriptionTier>, sqlx::Error> {
    sqlx::query_as::<_, SubscriptionTier>(
        r#"
        SELECT id, name, stripe_price_id, price, currency, billing_interval, features, max_notes, is_active, sort_order
        FROM subscription_tiers
        WHERE is_active = true
        ORDER BY sort_order, id
        "#,
    )
    .fetch_all(pool)
    .await
}
