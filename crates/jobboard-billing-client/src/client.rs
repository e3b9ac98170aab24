//! Billing gateway HTTP client implementation.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ClientError;
use crate::types::{
    ApiErrorResponse, CancelSubscriptionRequest, CancelSubscriptionResponse, CheckoutRequest,
    CheckoutResponse, PlansResponse, PortalRequest, PortalResponse, SubscriptionResponse,
};

/// Path prefix of the billing routes.
const API_PREFIX: [&str; 2] = ["api", "stripe"];

/// Billing gateway API client.
#[derive(Debug, Clone)]
pub struct BillingClient {
    client: Client,
    base_url: Url,
}

impl BillingClient {
    /// Create a new billing client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the gateway (e.g., `"http://billing:8000"`)
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the URL is invalid.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new billing client with custom options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the URL is invalid or the
    /// HTTP client cannot be built.
    pub fn with_options(base_url: &str, options: ClientOptions) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Configuration(format!("HTTP client: {e}")))?;

        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::Configuration(format!("Invalid base URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Configuration(format!(
                "Base URL cannot carry a path: {base_url}"
            )));
        }

        Ok(Self { client, base_url })
    }

    /// List the subscription plans on offer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_plans(&self) -> Result<PlansResponse, ClientError> {
        let response = self
            .client
            .get(self.endpoint(&["subscription-plans"]))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Start a subscription checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutResponse, ClientError> {
        tracing::debug!(
            user_id = %request.user_id,
            plan_id = %request.plan_id,
            "Requesting checkout session"
        );

        let response = self
            .client
            .post(self.endpoint(&["create-checkout-session"]))
            .json(request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a user's subscription status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_subscription(
        &self,
        user_id: &str,
    ) -> Result<SubscriptionResponse, ClientError> {
        let response = self
            .client
            .get(self.endpoint(&["subscription", user_id]))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Cancel a subscription at the end of its billing period.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn cancel_subscription(
        &self,
        request: &CancelSubscriptionRequest,
    ) -> Result<CancelSubscriptionResponse, ClientError> {
        let response = self
            .client
            .post(self.endpoint(&["cancel-subscription"]))
            .json(request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Create a billing portal session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_portal_session(
        &self,
        request: &PortalRequest,
    ) -> Result<PortalResponse, ClientError> {
        let response = self
            .client
            .post(self.endpoint(&["portal-session"]))
            .json(request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // INVARIANT: `with_options` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(API_PREFIX).extend(segments);
        }
        url
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => Err(ClientError::Api {
                code: api_error.error.code,
                message: api_error.error.message,
                status: status.as_u16(),
            }),
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 90, above the gateway's Stripe timeout).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 90,
        }
    }
}
