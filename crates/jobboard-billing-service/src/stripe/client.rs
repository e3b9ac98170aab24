//! Stripe API client implementation.

use std::time::Duration;

use async_trait::async_trait;
use jobboard_billing_core::PlanDefinition;
use reqwest::{Client, Url};

use super::types::{
    CheckoutLineItem, CheckoutSession, PortalSession, PriceData, ProductData, Recurring,
    StripeErrorResponse, Subscription,
};
use crate::provider::{CheckoutParams, PaymentProvider};

/// Placeholder Stripe substitutes with the real session id on redirect.
const CHECKOUT_SESSION_ID_TEMPLATE: &str = "{CHECKOUT_SESSION_ID}";

/// Error type for Stripe operations.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe API returned an error.
    #[error("Stripe API error: {error_type} - {message}")]
    Api {
        /// Error type.
        error_type: String,
        /// Error message.
        message: String,
        /// Error code.
        code: Option<String>,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Stripe API client.
#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl StripeClient {
    /// Create a new Stripe client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Stripe secret API key (`sk_test_...` or `sk_live_...`)
    /// * `base_url` - API root, normally `https://api.stripe.com/v1`
    /// * `timeout` - Per-request timeout
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StripeError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StripeError::Configuration(format!("HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| StripeError::Configuration(format!("Invalid Stripe API base: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url,
        })
    }

    /// Create a subscription-mode Checkout session for one plan.
    pub async fn create_checkout_session(
        &self,
        plan: &PlanDefinition,
        request: &CheckoutParams<'_>,
    ) -> Result<CheckoutSession, StripeError> {
        let line_item = CheckoutLineItem {
            price_data: PriceData {
                currency: plan.currency.to_string(),
                product_data: ProductData {
                    name: plan.name.to_string(),
                    description: Some(plan.description.to_string()),
                },
                unit_amount: plan.unit_amount(),
                recurring: Recurring {
                    interval: plan.interval.as_str().to_string(),
                },
            },
            quantity: 1,
        };

        let mut params: Vec<(String, String)> = vec![
            ("mode".into(), "subscription".into()),
            ("payment_method_types[0]".into(), "card".into()),
            ("success_url".into(), success_url_with_session(request.success_url)),
            ("cancel_url".into(), request.cancel_url.to_string()),
            ("client_reference_id".into(), request.user_id.to_string()),
            ("customer_email".into(), request.user_email.to_string()),
            ("metadata[user_id]".into(), request.user_id.to_string()),
            ("metadata[plan_id]".into(), plan.id.to_string()),
        ];
        params.extend(line_item.to_form_params(0));

        let line_items_json = serde_json::to_string(&[&line_item])?;
        tracing::debug!(
            user_id = %request.user_id,
            plan_id = %plan.id,
            unit_amount = %line_item.price_data.unit_amount,
            line_items = %line_items_json,
            "Creating Stripe checkout session"
        );

        let response = self
            .client
            .post(self.endpoint(&["checkout", "sessions"])?)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Schedule a subscription to end when its current period closes.
    ///
    /// This never cancels immediately; the customer keeps access until
    /// `current_period_end`.
    pub async fn cancel_at_period_end(
        &self,
        subscription_id: &str,
    ) -> Result<Subscription, StripeError> {
        tracing::debug!(subscription_id = %subscription_id, "Scheduling Stripe subscription cancellation");

        let response = self
            .client
            .post(self.endpoint(&["subscriptions", subscription_id])?)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&[("cancel_at_period_end", "true")])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Create a billing portal session for a customer.
    pub async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<PortalSession, StripeError> {
        let response = self
            .client
            .post(self.endpoint(&["billing_portal", "sessions"])?)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&[("customer", customer_id), ("return_url", return_url)])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Build an endpoint URL, percent-encoding each path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, StripeError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| StripeError::Configuration(format!("Invalid Stripe API base: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| StripeError::Configuration("Stripe API base cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<StripeErrorResponse, _> = response.json().await;

        match error_body {
            Ok(stripe_error) => Err(StripeError::Api {
                error_type: stripe_error.error.error_type,
                message: stripe_error.error.message,
                code: stripe_error.error.code,
            }),
            Err(_) => Err(StripeError::Api {
                error_type: "unknown".to_string(),
                message: format!("HTTP {status}"),
                code: None,
            }),
        }
    }
}

/// Ask Stripe to append the session id to the success redirect, unless the
/// caller already placed the template in the URL.
fn success_url_with_session(success_url: &str) -> String {
    if success_url.contains(CHECKOUT_SESSION_ID_TEMPLATE) {
        return success_url.to_string();
    }
    let separator = if success_url.contains('?') { '&' } else { '?' };
    format!("{success_url}{separator}session_id={CHECKOUT_SESSION_ID_TEMPLATE}")
}

#[async_trait]
impl PaymentProvider for StripeClient {
    fn is_mock(&self) -> bool {
        false
    }

    async fn create_checkout_session(
        &self,
        plan: &PlanDefinition,
        request: &CheckoutParams<'_>,
    ) -> Result<CheckoutSession, StripeError> {
        StripeClient::create_checkout_session(self, plan, request).await
    }

    async fn cancel_at_period_end(
        &self,
        subscription_id: &str,
    ) -> Result<Subscription, StripeError> {
        StripeClient::cancel_at_period_end(self, subscription_id).await
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<PortalSession, StripeError> {
        StripeClient::create_portal_session(self, customer_id, return_url).await
    }
}
