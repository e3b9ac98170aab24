//! Billing portal handler.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::Uri;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::query_or_json;
use crate::provider::MOCK_PORTAL_NOTICE;
use crate::state::AppState;

/// Portal session parameters (query string or JSON body).
#[derive(Debug, Deserialize)]
pub struct PortalRequest {
    /// Our user ID.
    pub user_id: String,
    /// Stripe customer ID.
    pub customer_id: String,
    /// Where the portal returns the user to.
    pub return_url: String,
}

/// Portal session response.
#[derive(Debug, Serialize)]
pub struct PortalResponse {
    /// Hosted portal URL.
    pub url: String,
    /// Present only when the mock provider answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Create a Stripe billing portal session for managing subscriptions.
pub async fn create_portal_session(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    body: Bytes,
) -> Result<Json<PortalResponse>, ApiError> {
    let request: PortalRequest = query_or_json(&uri, &body)?;

    let session = state
        .provider
        .create_portal_session(&request.customer_id, &request.return_url)
        .await?;

    tracing::info!(
        user_id = %request.user_id,
        customer_id = %request.customer_id,
        portal_session_id = %session.id,
        "Created billing portal session"
    );

    Ok(Json(PortalResponse {
        url: session.url,
        message: state.mock_notice(MOCK_PORTAL_NOTICE),
    }))
}
