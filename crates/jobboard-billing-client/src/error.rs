//! Client error types.

/// Errors that can occur when calling the billing gateway.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code (`bad_request`, `provider_error`, `internal_error`).
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Whether the payment provider, rather than the gateway, rejected the call.
    #[must_use]
    pub fn is_provider_error(&self) -> bool {
        matches!(self, Self::Api { code, .. } if code == "provider_error")
    }
}
