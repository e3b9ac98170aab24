//! API handlers.

pub mod checkout;
pub mod health;
pub mod plans;
pub mod portal;
pub mod subscriptions;
pub mod webhooks;

use axum::extract::Query;
use axum::http::Uri;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Read endpoint parameters from the query string, or from a JSON body when
/// the query string is empty.
pub(crate) fn query_or_json<T: DeserializeOwned>(uri: &Uri, body: &[u8]) -> Result<T, ApiError> {
    let has_query = uri.query().is_some_and(|q| !q.is_empty());

    if has_query || body.is_empty() {
        Query::<T>::try_from_uri(uri)
            .map(|Query(params)| params)
            .map_err(|e| ApiError::BadRequest(e.body_text()))
    } else {
        serde_json::from_slice(body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))
    }
}
