//! Plan catalog handler.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use jobboard_billing_core::{catalog, PlanDefinition};

use crate::state::AppState;

/// Plan catalog response.
#[derive(Debug, Serialize)]
pub struct PlansResponse {
    /// Plans keyed by plan ID.
    pub plans: BTreeMap<&'static str, &'static PlanDefinition>,
    /// Stripe publishable key for the frontend.
    pub publishable_key: String,
}

/// List all subscription plans.
pub async fn list_plans(State(state): State<Arc<AppState>>) -> Json<PlansResponse> {
    let plans = catalog().iter().map(|plan| (plan.id, plan)).collect();

    Json(PlansResponse {
        plans,
        publishable_key: state.config.stripe_publishable_key.clone(),
    })
}
