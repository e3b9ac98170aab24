//! Subscription status types.

use serde::{Deserialize, Serialize};

/// Plan identifier reported for users without a paid subscription.
pub const FREE_PLAN: &str = "free";

/// Status of a user's subscription.
///
/// Mirrors the provider's subscription states plus `None` for users that never
/// subscribed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// No subscription on record.
    None,
    /// Subscription is active.
    Active,
    /// In a trial period.
    Trialing,
    /// Latest invoice failed, provider is retrying.
    PastDue,
    /// Provider gave up collecting payment.
    Unpaid,
    /// First payment has not completed.
    Incomplete,
    /// Subscription was canceled (may still run until period end).
    Canceled,
}

/// A user's subscription as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionView {
    /// Provider subscription ID, absent when the user has none.
    pub subscription_id: Option<String>,
    /// Current status.
    pub status: SubscriptionStatus,
    /// Plan identifier, or `free`.
    pub plan: String,
    /// End of the current billing period (Unix seconds).
    pub current_period_end: Option<i64>,
}

impl SubscriptionView {
    /// The view for a user without a subscription.
    #[must_use]
    pub fn none() -> Self {
        Self {
            subscription_id: None,
            status: SubscriptionStatus::None,
            plan: FREE_PLAN.to_string(),
            current_period_end: None,
        }
    }
}
