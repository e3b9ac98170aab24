//! Stripe API types.

use serde::{Deserialize, Serialize};

/// Stripe Checkout session object.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// Session ID.
    pub id: String,
    /// Checkout URL to redirect the user to.
    #[serde(default)]
    pub url: Option<String>,
}

/// Stripe subscription object (the fields the gateway reads).
#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    /// Subscription ID.
    pub id: String,
    /// Provider status (`active`, `canceled`, `past_due`, ...).
    pub status: String,
    /// When the subscription will end (Unix), if scheduled.
    #[serde(default)]
    pub cancel_at: Option<i64>,
    /// Whether the subscription ends when the current period closes.
    #[serde(default)]
    pub cancel_at_period_end: bool,
}

/// Stripe billing portal session.
#[derive(Debug, Clone, Deserialize)]
pub struct PortalSession {
    /// Portal session ID.
    pub id: String,
    /// URL of the hosted portal.
    pub url: String,
}

/// Stripe webhook event.
///
/// Only the type tag and data object drive dispatch.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Event ID, when the envelope carries one.
    #[serde(default)]
    pub id: Option<String>,
    /// Event type (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event data.
    pub data: WebhookEventData,
}

/// Webhook event data container.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventData {
    /// The event object.
    pub object: serde_json::Value,
}

/// Checkout line item for creating sessions.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutLineItem {
    /// Price data for the line item.
    pub price_data: PriceData,
    /// Quantity.
    pub quantity: i64,
}

/// Price data for checkout.
#[derive(Debug, Clone, Serialize)]
pub struct PriceData {
    /// Currency (e.g., "thb").
    pub currency: String,
    /// Product data.
    pub product_data: ProductData,
    /// Unit amount in the currency's minor unit.
    pub unit_amount: i64,
    /// Recurring billing settings.
    pub recurring: Recurring,
}

/// Product data for checkout.
#[derive(Debug, Clone, Serialize)]
pub struct ProductData {
    /// Product name.
    pub name: String,
    /// Product description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Recurring price settings.
#[derive(Debug, Clone, Serialize)]
pub struct Recurring {
    /// `month` or `year`.
    pub interval: String,
}

impl CheckoutLineItem {
    /// Flatten into Stripe's bracketed form encoding for line item `index`.
    #[must_use]
    pub fn to_form_params(&self, index: usize) -> Vec<(String, String)> {
        let prefix = format!("line_items[{index}]");
        let price = &self.price_data;

        let mut params = vec![
            (
                format!("{prefix}[price_data][currency]"),
                price.currency.clone(),
            ),
            (
                format!("{prefix}[price_data][product_data][name]"),
                price.product_data.name.clone(),
            ),
        ];
        if let Some(description) = &price.product_data.description {
            params.push((
                format!("{prefix}[price_data][product_data][description]"),
                description.clone(),
            ));
        }
        params.extend([
            (
                format!("{prefix}[price_data][unit_amount]"),
                price.unit_amount.to_string(),
            ),
            (
                format!("{prefix}[price_data][recurring][interval]"),
                price.recurring.interval.clone(),
            ),
            (format!("{prefix}[quantity]"), self.quantity.to_string()),
        ]);
        params
    }
}

/// Stripe API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    /// Error details.
    pub error: StripeErrorDetail,
}

/// Stripe error detail.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorDetail {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message.
    pub message: String,
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
}
