//! Checkout session handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use jobboard_billing_core::require_plan;

use crate::error::ApiError;
use crate::provider::{CheckoutParams, MOCK_CHECKOUT_NOTICE};
use crate::state::AppState;

/// Create checkout session request.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// Catalog plan ID.
    pub plan_id: String,
    /// Our user ID.
    pub user_id: String,
    /// User email, prefilled on the checkout page.
    pub user_email: String,
    /// Redirect after successful payment.
    pub success_url: String,
    /// Redirect when checkout is abandoned.
    pub cancel_url: String,
}

/// Create checkout session response.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Checkout session ID.
    pub session_id: String,
    /// URL to redirect the user to.
    pub url: String,
    /// Present only when the mock provider answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Create a Stripe checkout session for a subscription plan.
pub async fn create_checkout_session(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let plan = require_plan(&body.plan_id)?;

    tracing::info!(
        user_id = %body.user_id,
        plan_id = %plan.id,
        "Creating checkout session"
    );

    let params = CheckoutParams {
        user_id: &body.user_id,
        user_email: &body.user_email,
        success_url: &body.success_url,
        cancel_url: &body.cancel_url,
    };

    let session = state
        .provider
        .create_checkout_session(plan, &params)
        .await?;

    let url = session
        .url
        .ok_or_else(|| ApiError::Internal(format!("Checkout session {} has no URL", session.id)))?;

    Ok(Json(CheckoutResponse {
        session_id: session.id,
        url,
        message: state.mock_notice(MOCK_CHECKOUT_NOTICE),
    }))
}
