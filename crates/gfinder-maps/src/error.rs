use thiserror::Error;

/// Errors returned by [`crate::MapsClient`].
#[derive(Debug, Error)]
pub enum MapsError {
    /// Network, TLS, timeout, or non-2xx HTTP status. The request URL is
    /// stripped before wrapping so the API key never reaches logs.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a `status` other than `OK` / `ZERO_RESULTS`.
    #[error("{endpoint} returned status {status}: {message}")]
    Status {
        endpoint: &'static str,
        status: String,
        message: String,
    },

    /// An `OK` details response carried no `result` object.
    #[error("{endpoint} response had no result")]
    MissingResult { endpoint: &'static str },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl MapsError {
    /// Service status string for [`MapsError::Status`], `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        match self {
            MapsError::Status { status, .. } => Some(status),
            _ => None,
        }
    }
}
