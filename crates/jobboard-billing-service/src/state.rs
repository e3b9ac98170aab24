//! Application state.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ServiceConfig;
use crate::provider::{MockProvider, PaymentProvider};
use crate::stripe::{StripeClient, StripeError};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: ServiceConfig,

    /// Payment provider (live Stripe or mock).
    pub provider: Arc<dyn PaymentProvider>,
}

impl AppState {
    /// Create a new application state, choosing the provider from `config`.
    pub fn new(config: ServiceConfig) -> Result<Self, StripeError> {
        let provider: Arc<dyn PaymentProvider> = if config.mock_provider {
            tracing::warn!("Mock payment provider enabled - no Stripe calls will be made");
            Arc::new(MockProvider)
        } else {
            let client = StripeClient::new(
                &config.stripe_secret_key,
                &config.stripe_api_base,
                Duration::from_secs(config.stripe_timeout_seconds),
            )?;
            tracing::info!(api_base = %config.stripe_api_base, "Stripe integration enabled");
            Arc::new(client)
        };

        if config.skip_webhook_verification {
            tracing::warn!("Webhook signature verification disabled - webhooks will be acknowledged without processing");
        }

        Ok(Self::with_provider(config, provider))
    }

    /// Create application state around an explicit provider.
    #[must_use]
    pub fn with_provider(config: ServiceConfig, provider: Arc<dyn PaymentProvider>) -> Self {
        Self { config, provider }
    }

    /// Check if the mock provider is in use.
    #[must_use]
    pub fn is_mock(&self) -> bool {
        self.provider.is_mock()
    }

    /// Attach a mock-mode notice to a response when running against the mock provider.
    #[must_use]
    pub fn mock_notice(&self, notice: &str) -> Option<String> {
        self.is_mock().then(|| notice.to_string())
    }
}
