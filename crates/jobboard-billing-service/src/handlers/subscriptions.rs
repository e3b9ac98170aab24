//! Subscription status and cancellation handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::Uri;
use axum::Json;
use serde::{Deserialize, Serialize};

use jobboard_billing_core::SubscriptionView;

use crate::error::ApiError;
use crate::handlers::query_or_json;
use crate::provider::{MOCK_CANCEL_NOTICE, MOCK_SUBSCRIPTION_NOTICE};
use crate::state::AppState;

/// Subscription status response.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    /// The subscription view.
    #[serde(flatten)]
    pub subscription: SubscriptionView,
    /// Present only when the mock provider answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Get a user's current subscription.
///
/// No subscription store exists yet, so every user reports `none` on the
/// `free` plan. Webhook events are only logged.
pub async fn get_subscription(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Json<SubscriptionResponse> {
    tracing::debug!(user_id = %user_id, "Fetching subscription status");

    Json(SubscriptionResponse {
        subscription: SubscriptionView::none(),
        message: state.mock_notice(MOCK_SUBSCRIPTION_NOTICE),
    })
}

/// Cancel subscription parameters (query string or JSON body).
#[derive(Debug, Deserialize)]
pub struct CancelSubscriptionRequest {
    /// Our user ID.
    pub user_id: String,
    /// Stripe subscription ID.
    pub subscription_id: String,
}

/// Cancel subscription response.
#[derive(Debug, Serialize)]
pub struct CancelSubscriptionResponse {
    /// Always `canceled`.
    pub status: String,
    /// When the subscription ends (Unix), as reported by Stripe.
    pub cancel_at: Option<i64>,
    /// Access continues until the current period ends.
    pub cancel_at_period_end: bool,
    /// Present only when the mock provider answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Cancel a subscription at the end of its billing period.
pub async fn cancel_subscription(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    body: Bytes,
) -> Result<Json<CancelSubscriptionResponse>, ApiError> {
    let request: CancelSubscriptionRequest = query_or_json(&uri, &body)?;

    tracing::info!(
        user_id = %request.user_id,
        subscription_id = %request.subscription_id,
        "Canceling subscription at period end"
    );

    let subscription = state
        .provider
        .cancel_at_period_end(&request.subscription_id)
        .await?;

    tracing::debug!(
        subscription_id = %subscription.id,
        provider_status = %subscription.status,
        cancel_at = ?subscription.cancel_at,
        "Subscription cancellation scheduled"
    );

    Ok(Json(CancelSubscriptionResponse {
        status: "canceled".to_string(),
        cancel_at: subscription.cancel_at,
        cancel_at_period_end: subscription.cancel_at_period_end,
        message: state.mock_notice(MOCK_CANCEL_NOTICE),
    }))
}
