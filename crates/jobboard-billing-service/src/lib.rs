//! Jobboard billing gateway.
//!
//! This crate provides the HTTP billing API for the jobboard marketplace:
//!
//! - Subscription plan catalog
//! - Stripe Checkout sessions for subscriptions
//! - Subscription status and cancellation at period end
//! - Stripe billing portal sessions
//! - Signed Stripe webhooks
//!
//! # Mock mode
//!
//! Without real Stripe credentials the service runs against
//! [`provider::MockProvider`], which answers every call with deterministic
//! values, and acknowledges webhooks without verifying them. Both behaviours
//! are selected explicitly in [`ServiceConfig`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers stay async for the router

pub mod config;
pub mod crypto;
pub mod error;
pub mod handlers;
pub mod provider;
pub mod routes;
pub mod state;
pub mod stripe;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use provider::{CheckoutParams, MockProvider, PaymentProvider};
pub use routes::create_router;
pub use state::AppState;
pub use stripe::{StripeClient, StripeError};
