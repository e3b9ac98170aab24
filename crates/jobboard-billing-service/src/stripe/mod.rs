//! Stripe integration for subscriptions.
//!
//! Stripe handles:
//! - Subscription checkout via hosted Checkout
//! - Cancellation at period end
//! - The hosted billing portal
//! - Signed webhook delivery of subscription and invoice events

pub mod client;
pub mod types;
pub mod webhook;

pub use client::StripeClient;
pub use client::StripeError;
pub use types::*;
pub use webhook::{compute_signature, construct_event, verify_signature, WebhookError};
