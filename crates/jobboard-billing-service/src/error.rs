//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use jobboard_billing_core::BillingError;

use crate::stripe::{StripeError, WebhookError};

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The payment provider rejected the request.
    #[error("provider error: {0}")]
    Provider(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::Provider(msg) => {
                tracing::warn!(error = %msg, "Payment provider rejected request");
                (StatusCode::BAD_REQUEST, "provider_error", msg)
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::UnknownPlan { plan_id } => {
                tracing::debug!(plan_id = %plan_id, "Rejected unknown plan");
                Self::BadRequest("Invalid plan ID".into())
            }
        }
    }
}

impl From<StripeError> for ApiError {
    fn from(err: StripeError) -> Self {
        match err {
            StripeError::Api { message, .. } => Self::Provider(message),
            StripeError::Http(_)
            | StripeError::Serialization(_)
            | StripeError::Configuration(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<WebhookError> for ApiError {
    fn from(err: WebhookError) -> Self {
        tracing::warn!(error = %err, "Rejected Stripe webhook");
        if err.is_signature_error() {
            Self::BadRequest("Invalid signature".into())
        } else {
            Self::BadRequest("Invalid payload".into())
        }
    }
}
