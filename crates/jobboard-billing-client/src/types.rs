//! Request and response types for the billing client.

use std::collections::BTreeMap;

use jobboard_billing_core::{BillingInterval, SubscriptionView};
use serde::{Deserialize, Serialize};

/// A subscription plan as listed by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Plan {
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Price in whole currency units (baht).
    pub price: u32,
    /// ISO currency code, lowercase.
    pub currency: String,
    /// Billing interval.
    pub interval: BillingInterval,
    /// Feature bullet points, in display order.
    pub features: Vec<String>,
}

/// Response from `GET /api/stripe/subscription-plans`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlansResponse {
    /// Plans keyed by plan ID.
    pub plans: BTreeMap<String, Plan>,
    /// Stripe publishable key for the frontend.
    pub publishable_key: String,
}

/// Request to start a subscription checkout.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    /// Plan ID from the catalog.
    pub plan_id: String,
    /// Our user ID.
    pub user_id: String,
    /// Email to prefill at checkout.
    pub user_email: String,
    /// Redirect after payment.
    pub success_url: String,
    /// Redirect when checkout is abandoned.
    pub cancel_url: String,
}

/// A created checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutResponse {
    /// Checkout session ID.
    pub session_id: String,
    /// Hosted checkout URL.
    pub url: String,
    /// Present only when the gateway runs in mock mode.
    #[serde(default)]
    pub message: Option<String>,
}

/// Response from `GET /api/stripe/subscription/{user_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionResponse {
    /// The user's subscription.
    #[serde(flatten)]
    pub subscription: SubscriptionView,
    /// Present only when the gateway runs in mock mode.
    #[serde(default)]
    pub message: Option<String>,
}

/// Request to cancel a subscription at period end.
#[derive(Debug, Clone, Serialize)]
pub struct CancelSubscriptionRequest {
    /// Our user ID.
    pub user_id: String,
    /// Stripe subscription ID.
    pub subscription_id: String,
}

/// Result of a cancellation.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelSubscriptionResponse {
    /// Always `canceled`.
    pub status: String,
    /// When the subscription will end (Unix seconds).
    #[serde(default)]
    pub cancel_at: Option<i64>,
    /// Whether access continues until the period closes.
    #[serde(default)]
    pub cancel_at_period_end: bool,
    /// Present only when the gateway runs in mock mode.
    #[serde(default)]
    pub message: Option<String>,
}

/// Request for a billing portal session.
#[derive(Debug, Clone, Serialize)]
pub struct PortalRequest {
    /// Our user ID.
    pub user_id: String,
    /// Stripe customer ID.
    pub customer_id: String,
    /// Where the portal sends the user back to.
    pub return_url: String,
}

/// A created billing portal session.
#[derive(Debug, Clone, Deserialize)]
pub struct PortalResponse {
    /// Portal URL.
    pub url: String,
    /// Present only when the gateway runs in mock mode.
    #[serde(default)]
    pub message: Option<String>,
}

/// Error envelope returned by the gateway.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub code: String,
    pub message: String,
}
