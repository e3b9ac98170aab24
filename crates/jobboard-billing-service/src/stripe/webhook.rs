//! Stripe webhook signature verification.
//!
//! Stripe signs each delivery with a `Stripe-Signature` header of the form
//! `t=<unix timestamp>,v1=<hex signature>[,v1=...]`. The signature is the
//! HMAC-SHA256 of `"{t}." + raw_body` keyed with the endpoint's signing secret.

use super::types::WebhookEvent;
use crate::crypto::{constant_time_eq, hmac_sha256_hex};

/// Reasons a webhook delivery is rejected.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// No `Stripe-Signature` header on the request.
    #[error("missing signature header")]
    MissingSignature,

    /// Header has no timestamp or no `v1` signatures.
    #[error("malformed signature header")]
    MalformedHeader,

    /// Timestamp is outside the accepted tolerance.
    #[error("timestamp outside tolerance: {timestamp}")]
    TimestampOutOfTolerance {
        /// Timestamp from the header.
        timestamp: i64,
    },

    /// No `v1` signature matched the payload.
    #[error("no signature matches the payload")]
    SignatureMismatch,

    /// Signature was valid but the body is not an event envelope.
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl WebhookError {
    /// Whether the failure is about the signature rather than the body.
    #[must_use]
    pub fn is_signature_error(&self) -> bool {
        !matches!(self, Self::InvalidPayload(_))
    }
}

/// Parsed `Stripe-Signature` header.
#[derive(Debug)]
struct SignatureHeader<'a> {
    timestamp: i64,
    signatures: Vec<&'a str>,
}

fn parse_header(header: &str) -> Result<SignatureHeader<'_>, WebhookError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let mut kv = part.trim().splitn(2, '=');
        match (kv.next(), kv.next()) {
            (Some("t"), Some(ts)) => timestamp = ts.parse::<i64>().ok(),
            (Some("v1"), Some(sig)) => signatures.push(sig),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(WebhookError::MalformedHeader)?;
    if signatures.is_empty() {
        return Err(WebhookError::MalformedHeader);
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}

/// Compute the `v1` signature Stripe would send for `payload` at `timestamp`.
#[must_use]
pub fn compute_signature(payload: &[u8], timestamp: i64, secret: &str) -> String {
    let mut signed_payload = format!("{timestamp}.").into_bytes();
    signed_payload.extend_from_slice(payload);
    hmac_sha256_hex(secret, &signed_payload)
}

/// Verify a `Stripe-Signature` header against the raw payload.
///
/// `now` is the current Unix time. Timestamps older than the tolerance are
/// rejected; a tolerance of zero or less disables the check.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_seconds: i64,
    now: i64,
) -> Result<(), WebhookError> {
    let header = parse_header(header)?;

    let expected = compute_signature(payload, header.timestamp, secret);
    let valid = header
        .signatures
        .iter()
        .any(|sig| constant_time_eq(&expected, sig));

    if !valid {
        return Err(WebhookError::SignatureMismatch);
    }

    if tolerance_seconds > 0 && now.saturating_sub(header.timestamp) > tolerance_seconds {
        return Err(WebhookError::TimestampOutOfTolerance {
            timestamp: header.timestamp,
        });
    }

    Ok(())
}

/// Verify the signature and parse the event envelope.
pub fn construct_event(
    payload: &[u8],
    header: Option<&str>,
    secret: &str,
    tolerance_seconds: i64,
) -> Result<WebhookEvent, WebhookError> {
    let header = header.ok_or(WebhookError::MissingSignature)?;
    verify_signature(
        payload,
        header,
        secret,
        tolerance_seconds,
        chrono::Utc::now().timestamp(),
    )?;

    Ok(serde_json::from_slice(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";
    const PAYLOAD: &[u8] = br#"{"id":"evt_1","type":"customer.subscription.updated","data":{"object":{"id":"sub_1"}}}"#;

    fn header_for(payload: &[u8], timestamp: i64, secret: &str) -> String {
        format!("t={timestamp},v1={}", compute_signature(payload, timestamp, secret))
    }

    #[test]
    fn valid_signature_is_accepted() {
        let header = header_for(PAYLOAD, 1_700_000_000, SECRET);
        assert!(verify_signature(PAYLOAD, &header, SECRET, 300, 1_700_000_100).is_ok());
    }

    #[test]
    fn any_matching_v1_is_accepted() {
        let good = compute_signature(PAYLOAD, 1_700_000_000, SECRET);
        let header = format!("t=1700000000,v1=deadbeef,v1={good}");
        assert!(verify_signature(PAYLOAD, &header, SECRET, 300, 1_700_000_000).is_ok());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let header = header_for(PAYLOAD, 1_700_000_000, "whsec_other");
        let err = verify_signature(PAYLOAD, &header, SECRET, 300, 1_700_000_000).unwrap_err();
        assert!(matches!(err, WebhookError::SignatureMismatch));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let header = header_for(PAYLOAD, 1_700_000_000, SECRET);
        let err = verify_signature(b"{}", &header, SECRET, 300, 1_700_000_000).unwrap_err();
        assert!(matches!(err, WebhookError::SignatureMismatch));
    }

    #[test]
    fn stale_timestamp_is_rejected() {
        let header = header_for(PAYLOAD, 1_700_000_000, SECRET);
        let err = verify_signature(PAYLOAD, &header, SECRET, 300, 1_700_000_301).unwrap_err();
        assert!(matches!(
            err,
            WebhookError::TimestampOutOfTolerance {
                timestamp: 1_700_000_000
            }
        ));
    }

    #[test]
    fn future_timestamp_is_accepted() {
        let header = header_for(PAYLOAD, 1_700_000_400, SECRET);
        assert!(verify_signature(PAYLOAD, &header, SECRET, 300, 1_700_000_000).is_ok());
    }

    #[test]
    fn extreme_timestamp_does_not_overflow() {
        let header = header_for(PAYLOAD, i64::MIN, SECRET);
        let err = verify_signature(PAYLOAD, &header, SECRET, 300, 1_700_000_000).unwrap_err();
        assert!(matches!(
            err,
            WebhookError::TimestampOutOfTolerance { timestamp: i64::MIN }
        ));
    }

    #[test]
    fn zero_tolerance_skips_timestamp_check() {
        let header = header_for(PAYLOAD, 1_000, SECRET);
        assert!(verify_signature(PAYLOAD, &header, SECRET, 0, 1_700_000_000).is_ok());
    }

    #[test]
    fn malformed_headers_are_rejected() {
        for header in ["", "garbage", "t=abc,v1=00", "t=1700000000", "v1=00"] {
            let err = verify_signature(PAYLOAD, header, SECRET, 300, 1_700_000_000).unwrap_err();
            assert!(
                matches!(err, WebhookError::MalformedHeader),
                "header {header:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn construct_event_requires_header() {
        let err = construct_event(PAYLOAD, None, SECRET, 300).unwrap_err();
        assert!(matches!(err, WebhookError::MissingSignature));
        assert!(err.is_signature_error());
    }

    #[test]
    fn construct_event_reports_bad_payload_after_valid_signature() {
        let payload = b"not json";
        let header = header_for(payload, chrono::Utc::now().timestamp(), SECRET);
        let err = construct_event(payload, Some(&header), SECRET, 300).unwrap_err();
        assert!(!err.is_signature_error());
    }

    #[test]
    fn construct_event_parses_signed_event() {
        let header = header_for(PAYLOAD, chrono::Utc::now().timestamp(), SECRET);
        let event = construct_event(PAYLOAD, Some(&header), SECRET, 300).unwrap();
        assert_eq!(event.id.as_deref(), Some("evt_1"));
        assert_eq!(event.event_type, "customer.subscription.updated");
    }
}
