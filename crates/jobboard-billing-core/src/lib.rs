//! Core types for the jobboard billing gateway.
//!
//! This crate provides the types shared by the gateway service and its client SDK:
//!
//! - **Plans**: `PlanDefinition`, `BillingInterval` and the static plan catalog
//! - **Subscriptions**: `SubscriptionView`, `SubscriptionStatus`
//! - **Errors**: `BillingError`
//!
//! # Prices
//!
//! Plan prices are whole units of the plan currency (Thai Baht). They are only
//! converted to the provider's minor units (satang, `price * 100`) when a
//! checkout request is built.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod plan;
pub mod subscription;

pub use error::{BillingError, Result};
pub use plan::{catalog, find_plan, require_plan, BillingInterval, PlanDefinition, PLAN_CURRENCY};
pub use subscription::{SubscriptionStatus, SubscriptionView, FREE_PLAN};
