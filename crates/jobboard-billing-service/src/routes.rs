//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{checkout, health, plans, portal, subscriptions, webhooks};
use crate::state::AppState;

/// Prefix the marketplace frontend uses for billing endpoints.
pub const API_PREFIX: &str = "/api/stripe";

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Billing (under `/api/stripe`)
/// - `GET /subscription-plans` - Plan catalog and publishable key
/// - `POST /create-checkout-session` - Start a subscription checkout
/// - `GET /subscription/:user_id` - Subscription status
/// - `POST /cancel-subscription` - Cancel at period end
/// - `POST /portal-session` - Billing portal link
///
/// ## Webhooks (signature verification)
/// - `POST /api/stripe/webhook` - Stripe webhooks
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let billing_routes = Router::new()
        .route("/subscription-plans", get(plans::list_plans))
        .route(
            "/create-checkout-session",
            post(checkout::create_checkout_session),
        )
        .route("/subscription/:user_id", get(subscriptions::get_subscription))
        .route(
            "/cancel-subscription",
            post(subscriptions::cancel_subscription),
        )
        .route("/portal-session", post(portal::create_portal_session))
        .route("/webhook", post(webhooks::stripe_webhook));

    Router::new()
        .route("/health", get(health::health))
        .nest(API_PREFIX, billing_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
