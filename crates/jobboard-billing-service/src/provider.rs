//! Payment provider abstraction.
//!
//! Handlers talk to a [`PaymentProvider`] rather than to Stripe directly. The
//! live implementation is [`crate::stripe::StripeClient`]; [`MockProvider`]
//! answers with deterministic values and never touches the network, for
//! deployments without real Stripe credentials.

use async_trait::async_trait;
use jobboard_billing_core::PlanDefinition;

use crate::stripe::{CheckoutSession, PortalSession, StripeError, Subscription};

/// Session ID returned by the mock provider.
pub const MOCK_SESSION_ID: &str = "mock_session_id_replace_with_real_stripe_keys";

/// Notice attached to mock checkout responses.
pub const MOCK_CHECKOUT_NOTICE: &str =
    "Mock checkout session created. Replace Stripe keys with real ones for production.";

/// Notice attached to mock subscription status responses.
pub const MOCK_SUBSCRIPTION_NOTICE: &str =
    "Using mock subscription data. Replace Stripe keys with real ones.";

/// Notice attached to mock cancellation responses.
pub const MOCK_CANCEL_NOTICE: &str =
    "Mock subscription canceled. Replace Stripe keys with real ones.";

/// Notice attached to mock portal responses.
pub const MOCK_PORTAL_NOTICE: &str = "Mock portal session. Replace Stripe keys with real ones.";

/// Caller-supplied details for a checkout session.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutParams<'a> {
    /// Our user ID, echoed back in webhooks as `client_reference_id`.
    pub user_id: &'a str,
    /// Email to prefill on the checkout page.
    pub user_email: &'a str,
    /// Redirect after successful payment.
    pub success_url: &'a str,
    /// Redirect when the user abandons checkout.
    pub cancel_url: &'a str,
}

/// Operations the gateway needs from a payment provider.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Whether responses are fabricated rather than real.
    fn is_mock(&self) -> bool;

    /// Create a subscription checkout session for `plan`.
    async fn create_checkout_session(
        &self,
        plan: &PlanDefinition,
        request: &CheckoutParams<'_>,
    ) -> Result<CheckoutSession, StripeError>;

    /// Schedule cancellation at the end of the current billing period.
    async fn cancel_at_period_end(&self, subscription_id: &str)
        -> Result<Subscription, StripeError>;

    /// Create a billing portal session.
    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<PortalSession, StripeError>;
}

/// Provider that fabricates deterministic responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProvider;

#[async_trait]
impl PaymentProvider for MockProvider {
    fn is_mock(&self) -> bool {
        true
    }

    async fn create_checkout_session(
        &self,
        plan: &PlanDefinition,
        request: &CheckoutParams<'_>,
    ) -> Result<CheckoutSession, StripeError> {
        tracing::warn!(
            user_id = %request.user_id,
            plan_id = %plan.id,
            "Using mock payment provider - returning mock checkout session"
        );

        Ok(CheckoutSession {
            id: MOCK_SESSION_ID.to_string(),
            url: Some(format!(
                "{}?session_id=mock_session_success",
                request.success_url
            )),
        })
    }

    async fn cancel_at_period_end(
        &self,
        subscription_id: &str,
    ) -> Result<Subscription, StripeError> {
        tracing::warn!(
            subscription_id = %subscription_id,
            "Using mock payment provider - subscription not actually canceled"
        );

        Ok(Subscription {
            id: subscription_id.to_string(),
            status: "canceled".to_string(),
            cancel_at: None,
            cancel_at_period_end: true,
        })
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<PortalSession, StripeError> {
        tracing::warn!(
            customer_id = %customer_id,
            "Using mock payment provider - returning mock portal session"
        );

        Ok(PortalSession {
            id: "mock_portal_session".to_string(),
            url: format!("{return_url}?mock_portal=true"),
        })
    }
}
