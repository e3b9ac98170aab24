//! Jobboard billing service - HTTP gateway to Stripe subscriptions.
//!
//! This is the main entry point for the billing service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobboard_billing_service::{create_router, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,jobboard_billing=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting jobboard billing service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        mock_provider = %config.mock_provider,
        skip_webhook_verification = %config.skip_webhook_verification,
        stripe_api_base = %config.stripe_api_base,
        "Service configuration loaded"
    );

    let state = AppState::new(config.clone())?;

    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
