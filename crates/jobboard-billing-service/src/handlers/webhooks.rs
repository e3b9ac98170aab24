//! Stripe webhook handler.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;
use crate::stripe::{construct_event, WebhookEvent};

/// Header carrying Stripe's webhook signature.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Webhook response.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    /// `success`, or `mock_webhook_received` when verification is disabled.
    pub status: &'static str,
}

/// What a recognised webhook event told us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Checkout finished and a subscription was created.
    SubscriptionCreated {
        /// Our user ID (`client_reference_id`).
        user_id: Option<String>,
        /// Stripe subscription ID.
        subscription_id: Option<String>,
    },
    /// A subscription changed (plan, status, renewal).
    SubscriptionUpdated {
        /// Stripe subscription ID.
        subscription_id: String,
    },
    /// A subscription ended.
    SubscriptionCanceled {
        /// Stripe subscription ID.
        subscription_id: String,
    },
    /// An invoice payment failed.
    PaymentFailed {
        /// Stripe invoice ID.
        invoice_id: String,
    },
}

/// Handle Stripe webhooks.
pub async fn stripe_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, ApiError> {
    if state.config.skip_webhook_verification {
        tracing::warn!("Webhook verification disabled - acknowledging without processing");
        return Ok(Json(WebhookResponse {
            status: "mock_webhook_received",
        }));
    }

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let event = construct_event(
        &body,
        signature,
        &state.config.stripe_webhook_secret,
        state.config.webhook_tolerance_seconds,
    )?;

    tracing::info!(
        event_type = %event.event_type,
        event_id = ?event.id,
        "Received Stripe webhook"
    );

    // Redeliveries are dispatched again; a subscription store would need to
    // deduplicate on `event.id`.
    if dispatch_event(&event)?.is_none() {
        tracing::debug!(event_type = %event.event_type, "Unhandled Stripe event");
    }

    Ok(Json(WebhookResponse { status: "success" }))
}

/// Route an event to its handler. Unknown event types yield `None`.
pub fn dispatch_event(event: &WebhookEvent) -> Result<Option<WebhookOutcome>, ApiError> {
    let object = &event.data.object;

    let outcome = match event.event_type.as_str() {
        "checkout.session.completed" => handle_checkout_completed(object),
        "customer.subscription.updated" => handle_subscription_updated(object)?,
        "customer.subscription.deleted" => handle_subscription_deleted(object)?,
        "invoice.payment_failed" => handle_payment_failed(object)?,
        _ => return Ok(None),
    };

    Ok(Some(outcome))
}

fn str_field(data: &serde_json::Value, key: &str) -> Option<String> {
    data.get(key).and_then(|v| v.as_str()).map(String::from)
}

fn required_id(data: &serde_json::Value, kind: &str) -> Result<String, ApiError> {
    str_field(data, "id").ok_or_else(|| ApiError::Internal(format!("{kind} object without id")))
}

/// Handle a completed checkout.
///
/// Only logged for now. Persisting the user → subscription link belongs here
/// once a subscription store exists.
fn handle_checkout_completed(data: &serde_json::Value) -> WebhookOutcome {
    let user_id = str_field(data, "client_reference_id");
    let subscription_id = str_field(data, "subscription");

    tracing::info!(
        user_id = ?user_id,
        subscription_id = ?subscription_id,
        "Subscription created from checkout"
    );

    WebhookOutcome::SubscriptionCreated {
        user_id,
        subscription_id,
    }
}

fn handle_subscription_updated(data: &serde_json::Value) -> Result<WebhookOutcome, ApiError> {
    let subscription_id = required_id(data, "subscription")?;
    let status = data
        .get("status")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");

    tracing::info!(
        subscription_id = %subscription_id,
        status = %status,
        "Subscription updated"
    );

    Ok(WebhookOutcome::SubscriptionUpdated { subscription_id })
}

fn handle_subscription_deleted(data: &serde_json::Value) -> Result<WebhookOutcome, ApiError> {
    let subscription_id = required_id(data, "subscription")?;

    tracing::info!(subscription_id = %subscription_id, "Subscription canceled");

    Ok(WebhookOutcome::SubscriptionCanceled { subscription_id })
}

/// Handle an invoice payment failure.
///
/// Stripe retries the charge on its own schedule; the user is not notified yet.
fn handle_payment_failed(data: &serde_json::Value) -> Result<WebhookOutcome, ApiError> {
    let invoice_id = required_id(data, "invoice")?;

    tracing::warn!(
        invoice_id = %invoice_id,
        customer = ?str_field(data, "customer"),
        "Payment failed - user may need to update payment method"
    );

    Ok(WebhookOutcome::PaymentFailed { invoice_id })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::stripe::WebhookEventData;

    fn event(event_type: &str, object: serde_json::Value) -> WebhookEvent {
        WebhookEvent {
            id: Some("evt_test".into()),
            event_type: event_type.into(),
            data: WebhookEventData { object },
        }
    }

    #[test]
    fn checkout_completed_extracts_user_and_subscription() {
        let outcome = dispatch_event(&event(
            "checkout.session.completed",
            json!({"id": "cs_1", "client_reference_id": "u1", "subscription": "sub_1"}),
        ))
        .unwrap();

        assert_eq!(
            outcome,
            Some(WebhookOutcome::SubscriptionCreated {
                user_id: Some("u1".into()),
                subscription_id: Some("sub_1".into()),
            })
        );
    }

    #[test]
    fn checkout_completed_tolerates_missing_fields() {
        let outcome = dispatch_event(&event("checkout.session.completed", json!({}))).unwrap();
        assert_eq!(
            outcome,
            Some(WebhookOutcome::SubscriptionCreated {
                user_id: None,
                subscription_id: None,
            })
        );
    }

    #[test]
    fn subscription_events_carry_subscription_id() {
        let updated = dispatch_event(&event(
            "customer.subscription.updated",
            json!({"id": "sub_1", "status": "past_due"}),
        ))
        .unwrap();
        assert_eq!(
            updated,
            Some(WebhookOutcome::SubscriptionUpdated {
                subscription_id: "sub_1".into()
            })
        );

        let deleted =
            dispatch_event(&event("customer.subscription.deleted", json!({"id": "sub_2"})))
                .unwrap();
        assert_eq!(
            deleted,
            Some(WebhookOutcome::SubscriptionCanceled {
                subscription_id: "sub_2".into()
            })
        );
    }

    #[test]
    fn payment_failed_carries_invoice_id() {
        let outcome =
            dispatch_event(&event("invoice.payment_failed", json!({"id": "in_1"}))).unwrap();
        assert_eq!(
            outcome,
            Some(WebhookOutcome::PaymentFailed {
                invoice_id: "in_1".into()
            })
        );
    }

    #[test]
    fn unknown_events_are_ignored() {
        for event_type in ["customer.created", "invoice.paid", "customer.subscription.created"] {
            let outcome = dispatch_event(&event(event_type, json!({"id": "x"}))).unwrap();
            assert!(outcome.is_none(), "{event_type} should be ignored");
        }
    }

    #[test]
    fn subscription_event_without_id_is_internal_error() {
        let err = dispatch_event(&event("customer.subscription.deleted", json!({}))).unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
