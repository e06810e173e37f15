use serde::Deserialize;

use crate::error::PipelineError;

/// Upper bound accepted for a requested result count. Larger values are
/// clamped to it when the [`Query`] is built.
pub const MAX_DESIRED_COUNT: u32 = 100;

/// Hard cap on how many candidates are enriched per request. Bounds the
/// detail-call fan-out and therefore request latency.
pub const MAX_SELECTION: usize = 20;

/// Raw, unvalidated search input as it arrives from a caller.
///
/// All fields are optional at this level so that a missing field surfaces as
/// [`PipelineError::InvalidQuery`] rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default, alias = "cep")]
    pub location_text: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default, alias = "clientCount")]
    pub desired_count: Option<i64>,
}

impl SearchRequest {
    #[must_use]
    pub fn new(location_text: &str, keyword: &str, desired_count: i64) -> Self {
        Self {
            location_text: Some(location_text.to_owned()),
            keyword: Some(keyword.to_owned()),
            desired_count: Some(desired_count),
        }
    }
}

/// A validated search query. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    location_text: String,
    keyword: String,
    desired_count: u32,
}

impl Query {
    /// Validates and builds a query.
    ///
    /// Text fields are trimmed and must be non-empty. `desired_count` must be
    /// at least 1; values above [`MAX_DESIRED_COUNT`] are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidQuery`] describing the first invalid
    /// field.
    pub fn new(
        location_text: &str,
        keyword: &str,
        desired_count: i64,
    ) -> Result<Self, PipelineError> {
        let location_text = location_text.trim();
        if location_text.is_empty() {
            return Err(PipelineError::InvalidQuery(
                "location text must not be empty".to_string(),
            ));
        }

        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(PipelineError::InvalidQuery(
                "keyword must not be empty".to_string(),
            ));
        }

        if desired_count < 1 {
            return Err(PipelineError::InvalidQuery(format!(
                "desired count must be at least 1, got {desired_count}"
            )));
        }

        let desired_count = u32::try_from(desired_count)
            .unwrap_or(MAX_DESIRED_COUNT)
            .min(MAX_DESIRED_COUNT);

        Ok(Self {
            location_text: location_text.to_owned(),
            keyword: keyword.to_owned(),
            desired_count,
        })
    }

    #[must_use]
    pub fn location_text(&self) -> &str {
        &self.location_text
    }

    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    #[must_use]
    pub fn desired_count(&self) -> u32 {
        self.desired_count
    }

    /// Number of candidates to enrich given `available` search results:
    /// `min(desired_count, MAX_SELECTION, available)`.
    #[must_use]
    pub fn selection_size(&self, available: usize) -> usize {
        let desired = usize::try_from(self.desired_count).unwrap_or(MAX_SELECTION);
        desired.min(MAX_SELECTION).min(available)
    }
}

impl TryFrom<SearchRequest> for Query {
    type Error = PipelineError;

    fn try_from(request: SearchRequest) -> Result<Self, Self::Error> {
        let location_text = request.location_text.ok_or_else(|| {
            PipelineError::InvalidQuery("location text is required".to_string())
        })?;
        let keyword = request
            .keyword
            .ok_or_else(|| PipelineError::InvalidQuery("keyword is required".to_string()))?;
        let desired_count = request
            .desired_count
            .ok_or_else(|| PipelineError::InvalidQuery("desired count is required".to_string()))?;
        Query::new(&location_text, &keyword, desired_count)
    }
}
