//! Common test utilities for billing gateway integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use axum::body::Bytes;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use axum_test::{TestRequest, TestServer};

use jobboard_billing_service::stripe::compute_signature;
use jobboard_billing_service::{create_router, AppState, ServiceConfig};

/// Webhook signing secret used by live-mode harnesses.
pub const WEBHOOK_SECRET: &str = "whsec_test_signing_secret";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The configuration the server was built with.
    pub config: ServiceConfig,
}

impl TestHarness {
    /// Harness running against the mock provider with webhook verification off.
    pub fn new() -> Self {
        Self::with_config(ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            ..ServiceConfig::default()
        })
    }

    /// Harness talking to a fake Stripe at `stripe_uri` with verification on.
    pub fn live(stripe_uri: &str) -> Self {
        Self::with_config(ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            stripe_secret_key: "sk_test_integration".into(),
            stripe_publishable_key: "pk_test_integration".into(),
            stripe_webhook_secret: WEBHOOK_SECRET.into(),
            stripe_api_base: format!("{stripe_uri}/v1"),
            stripe_timeout_seconds: 5,
            mock_provider: false,
            skip_webhook_verification: false,
            ..ServiceConfig::default()
        })
    }

    /// Harness built from an explicit configuration.
    pub fn with_config(config: ServiceConfig) -> Self {
        let state = AppState::new(config.clone()).expect("Failed to build app state");
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, config }
    }

    /// POST a webhook body with the given signature header (if any).
    pub fn webhook(&self, payload: &str, signature: Option<String>) -> TestRequest {
        let mut request = self
            .server
            .post("/api/stripe/webhook")
            .content_type("application/json")
            .bytes(Bytes::from(payload.to_owned()));

        if let Some(signature) = signature {
            request = request.add_header(
                HeaderName::from_static("stripe-signature"),
                HeaderValue::from_str(&signature).expect("valid header value"),
            );
        }
        request
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A `Stripe-Signature` header for `payload`, signed now with `secret`.
pub fn sign(payload: &str, secret: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp();
    format!(
        "t={timestamp},v1={}",
        compute_signature(payload.as_bytes(), timestamp, secret)
    )
}
