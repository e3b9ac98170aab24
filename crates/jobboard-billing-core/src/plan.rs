//! Subscription plan catalog.
//!
//! The catalog is a fixed table compiled into the binary. Plans are looked up by
//! their stable identifier (e.g. `basic_monthly`) and never change at runtime.

use serde::{Deserialize, Serialize};

use crate::error::{BillingError, Result};

/// Currency every plan is billed in (Thai Baht).
pub const PLAN_CURRENCY: &str = "thb";

/// Billing interval of a recurring plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    /// Billed every month.
    Month,
    /// Billed every year.
    Year,
}

impl BillingInterval {
    /// The interval name as the payment provider expects it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// A subscription plan offered on the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanDefinition {
    /// Stable plan identifier, used as the catalog key.
    #[serde(skip)]
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Short marketing description.
    pub description: &'static str,
    /// Price in whole currency units.
    pub price: u32,
    /// ISO currency code (lowercase).
    pub currency: &'static str,
    /// Billing interval.
    pub interval: BillingInterval,
    /// Ordered feature bullet points, for display only.
    pub features: &'static [&'static str],
}

impl PlanDefinition {
    /// Price in the provider's minor currency unit.
    #[must_use]
    pub fn unit_amount(&self) -> i64 {
        i64::from(self.price) * 100
    }
}

static PLANS: [PlanDefinition; 6] = [
    PlanDefinition {
        id: "basic_monthly",
        name: "Basic Plan - Monthly",
        description: "Perfect for job seekers",
        price: 499,
        currency: PLAN_CURRENCY,
        interval: BillingInterval::Month,
        features: &[
            "Create professional profile",
            "Apply to unlimited jobs",
            "Save up to 10 jobs",
            "Basic portfolio (5 projects)",
            "Email support",
        ],
    },
    PlanDefinition {
        id: "basic_annual",
        name: "Basic Plan - Annual",
        description: "Perfect for job seekers (Save 17%)",
        price: 4990,
        currency: PLAN_CURRENCY,
        interval: BillingInterval::Year,
        features: &[
            "All Basic Monthly features",
            "Save ฿998 per year",
            "Priority support",
        ],
    },
    PlanDefinition {
        id: "professional_monthly",
        name: "Professional Plan - Monthly",
        description: "For BIM professionals",
        price: 999,
        currency: PLAN_CURRENCY,
        interval: BillingInterval::Month,
        features: &[
            "All Basic features",
            "Featured profile listing",
            "Unlimited portfolio projects",
            "Advanced analytics",
            "Priority job applications",
            "Direct messaging with employers",
            "Profile badge",
            "Priority support",
        ],
    },
    PlanDefinition {
        id: "professional_annual",
        name: "Professional Plan - Annual",
        description: "For BIM professionals (Save 17%)",
        price: 9990,
        currency: PLAN_CURRENCY,
        interval: BillingInterval::Year,
        features: &[
            "All Professional Monthly features",
            "Save ฿1,998 per year",
            "24/7 priority support",
        ],
    },
    PlanDefinition {
        id: "enterprise_monthly",
        name: "Enterprise Plan - Monthly",
        description: "For companies",
        price: 2999,
        currency: PLAN_CURRENCY,
        interval: BillingInterval::Month,
        features: &[
            "Post unlimited jobs",
            "Featured company profile",
            "Advanced candidate screening",
            "Team collaboration tools",
            "Company portfolio showcase",
            "Analytics dashboard",
            "API access",
            "Dedicated account manager",
            "24/7 premium support",
        ],
    },
    PlanDefinition {
        id: "enterprise_annual",
        name: "Enterprise Plan - Annual",
        description: "For companies (Save 17%)",
        price: 29990,
        currency: PLAN_CURRENCY,
        interval: BillingInterval::Year,
        features: &[
            "All Enterprise Monthly features",
            "Save ฿5,988 per year",
            "Custom integrations",
            "Onboarding assistance",
        ],
    },
];

/// All plans, in display order.
#[must_use]
pub fn catalog() -> &'static [PlanDefinition] {
    &PLANS
}

/// Look up a plan by identifier.
#[must_use]
pub fn find_plan(plan_id: &str) -> Option<&'static PlanDefinition> {
    PLANS.iter().find(|plan| plan.id == plan_id)
}

/// Look up a plan by identifier, failing with [`BillingError::UnknownPlan`].
pub fn require_plan(plan_id: &str) -> Result<&'static PlanDefinition> {
    find_plan(plan_id).ok_or_else(|| BillingError::UnknownPlan {
        plan_id: plan_id.to_string(),
    })
}
