//! Jobboard billing client SDK.
//!
//! Typed access to the billing gateway for the marketplace backend and tools.
//!
//! # Example
//!
//! ```no_run
//! use jobboard_billing_client::{BillingClient, CheckoutRequest};
//!
//! # async fn example() -> Result<(), jobboard_billing_client::ClientError> {
//! let client = BillingClient::new("http://billing.jobboard.svc:8000")?;
//!
//! let plans = client.list_plans().await?;
//! println!("{} plans on offer", plans.plans.len());
//!
//! let session = client
//!     .create_checkout_session(&CheckoutRequest {
//!         plan_id: "basic_monthly".to_string(),
//!         user_id: "user-123".to_string(),
//!         user_email: "somchai@example.co.th".to_string(),
//!         success_url: "https://jobboard.example/dashboard".to_string(),
//!         cancel_url: "https://jobboard.example/pricing".to_string(),
//!     })
//!     .await?;
//!
//! println!("Redirect to {}", session.url);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{BillingClient, ClientOptions};
pub use error::ClientError;
pub use types::*;
