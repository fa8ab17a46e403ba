use thiserror::Error;

/// Errors returned by the sipgate API client.
#[derive(Debug, Error)]
pub enum SipgateError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The sipgate API answered with a non-2xx status.
    #[error("sipgate API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl SipgateError {
    /// HTTP status attached to the failure, if the server produced one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            SipgateError::Api { status, .. } => Some(*status),
            SipgateError::Http(e) => e.status().map(|s| s.as_u16()),
            SipgateError::Deserialize { .. } | SipgateError::InvalidBaseUrl { .. } => None,
        }
    }
}
