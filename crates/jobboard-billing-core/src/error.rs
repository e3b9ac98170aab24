//! Error types for the billing core.

/// Result type for billing core operations.
pub type Result<T> = std::result::Result<T, BillingError>;

/// Errors that can occur in billing core operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BillingError {
    /// The requested plan is not part of the catalog.
    #[error("unknown plan: {plan_id}")]
    UnknownPlan {
        /// The plan identifier that was requested.
        plan_id: String,
    },
}
