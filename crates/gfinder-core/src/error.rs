use thiserror::Error;

/// Errors raised while loading [`crate::AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Stable, client-facing name of a request-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidQuery,
    LocationNotFound,
    SearchFailed,
    UpstreamUnavailable,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidQuery => "InvalidQuery",
            ErrorKind::LocationNotFound => "LocationNotFound",
            ErrorKind::SearchFailed => "SearchFailed",
            ErrorKind::UpstreamUnavailable => "UpstreamUnavailable",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of the geocoder adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeocodeError {
    /// The service could not resolve the location text.
    #[error("location not found: {location}")]
    LocationNotFound { location: String },

    /// Transport failure or service-side refusal.
    #[error("geocoding service unavailable: {0}")]
    UpstreamUnavailable(String),
}

/// Failure of the place search adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The search service answered with an error status.
    #[error("place search failed: {0}")]
    SearchFailed(String),

    /// Transport failure reaching the search service.
    #[error("place search service unavailable: {0}")]
    UpstreamUnavailable(String),
}

/// Failure of the enrichment adapter for a single place.
///
/// The pipeline recovers from this locally; it never becomes a
/// [`PipelineError`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("details unavailable for place {place_id}: {reason}")]
pub struct DetailUnavailable {
    pub place_id: String,
    pub reason: String,
}

/// Fatal, request-level failure of the enrichment pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("location not found: {0}")]
    LocationNotFound(String),

    #[error("place search failed: {0}")]
    SearchFailed(String),

    #[error("upstream service unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl PipelineError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::InvalidQuery(_) => ErrorKind::InvalidQuery,
            PipelineError::LocationNotFound(_) => ErrorKind::LocationNotFound,
            PipelineError::SearchFailed(_) => ErrorKind::SearchFailed,
            PipelineError::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
        }
    }
}

impl From<GeocodeError> for PipelineError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::LocationNotFound { location } => PipelineError::LocationNotFound(location),
            GeocodeError::UpstreamUnavailable(reason) => PipelineError::UpstreamUnavailable(reason),
        }
    }
}

impl From<SearchError> for PipelineError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::SearchFailed(reason) => PipelineError::SearchFailed(reason),
            SearchError::UpstreamUnavailable(reason) => PipelineError::UpstreamUnavailable(reason),
        }
    }
}
