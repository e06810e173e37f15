//! Enrichment pipeline orchestration.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use gfinder_core::{
    AppConfig, CandidatePlace, DetailUnavailable, EnrichedContact, PipelineError, Query,
    SearchRequest, MAX_SELECTION,
};
use gfinder_maps::MapsClient;

use crate::adapters::{Geocoder, PlaceEnricher, PlaceSearch, SEARCH_RADIUS_METERS};

/// Tuning for the detail-lookup fan-out.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Independent timeout applied to each detail call.
    pub detail_timeout: Duration,
    /// Upper bound on detail calls in flight at once.
    pub max_concurrent_details: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            detail_timeout: Duration::from_secs(10),
            max_concurrent_details: MAX_SELECTION,
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            detail_timeout: Duration::from_secs(config.detail_timeout_secs),
            max_concurrent_details: config.max_concurrent_details.max(1),
        }
    }
}

/// Progress of the detail-lookup stage, reported once per finished call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichmentProgress {
    pub completed: usize,
    pub total: usize,
}

impl EnrichmentProgress {
    /// Whole-number percentage, 0–100.
    #[must_use]
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 100;
        }
        self.completed * 100 / self.total
    }
}

pub type ProgressObserver = Arc<dyn Fn(EnrichmentProgress) + Send + Sync>;

/// Result of enriching one selected candidate.
///
/// Kept separate from [`PipelineError`]: a degraded entry is substituted and
/// the run continues, a pipeline error aborts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentOutcome {
    Enriched(EnrichedContact),
    Degraded {
        contact: EnrichedContact,
        cause: DetailUnavailable,
    },
}

impl EnrichmentOutcome {
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, EnrichmentOutcome::Degraded { .. })
    }

    #[must_use]
    pub fn into_contact(self) -> EnrichedContact {
        match self {
            EnrichmentOutcome::Enriched(contact) | EnrichmentOutcome::Degraded { contact, .. } => {
                contact
            }
        }
    }
}

/// Successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Contacts in search order; at most `min(desired_count, 20)` entries.
    pub results: Vec<EnrichedContact>,
    /// Advisory message present when at least one entry degraded.
    pub warning: Option<String>,
    /// Number of entries that fell back to search-only data.
    pub degraded: usize,
}

impl SearchOutcome {
    fn empty() -> Self {
        Self {
            results: Vec::new(),
            warning: None,
            degraded: 0,
        }
    }
}

/// Geocode → nearby search → per-place details, with per-place degradation.
#[derive(Clone)]
pub struct EnrichmentPipeline {
    geocoder: Arc<dyn Geocoder>,
    search: Arc<dyn PlaceSearch>,
    enricher: Arc<dyn PlaceEnricher>,
    options: PipelineOptions,
    observer: Option<ProgressObserver>,
}

impl EnrichmentPipeline {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        search: Arc<dyn PlaceSearch>,
        enricher: Arc<dyn PlaceEnricher>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            geocoder,
            search,
            enricher,
            options,
            observer: None,
        }
    }

    /// Pipeline whose three stages all go through one Google Maps client.
    #[must_use]
    pub fn google(client: MapsClient, options: PipelineOptions) -> Self {
        let client = Arc::new(client);
        Self::new(client.clone(), client.clone(), client, options)
    }

    /// Registers a callback invoked after every detail call completes.
    #[must_use]
    pub fn with_progress(mut self, observer: ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Validates a raw request and runs the pipeline for it.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidQuery`] without issuing any network
    /// call if the request fails validation; otherwise see [`Self::run_query`].
    pub async fn run(&self, request: SearchRequest) -> Result<SearchOutcome, PipelineError> {
        let query = Query::try_from(request)?;
        self.run_query(&query).await
    }

    /// Runs the pipeline for an already validated query.
    ///
    /// 1. Geocode the location text.
    /// 2. Search nearby places within [`SEARCH_RADIUS_METERS`].
    /// 3. Select the first `min(desired_count, 20)` candidates.
    /// 4. Fetch details for the selection concurrently, reassembling in
    ///    selection order. Failed or timed-out lookups degrade to the
    ///    candidate's display name and the no-phone sentinel.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::LocationNotFound`] if geocoding finds nothing.
    /// - [`PipelineError::SearchFailed`] if the search service rejects the call.
    /// - [`PipelineError::UpstreamUnavailable`] if either service cannot be reached.
    ///
    /// Detail failures never produce an error.
    pub async fn run_query(&self, query: &Query) -> Result<SearchOutcome, PipelineError> {
        tracing::info!(
            location = query.location_text(),
            keyword = query.keyword(),
            desired_count = query.desired_count(),
            "starting lead search"
        );

        let coordinates = self.geocoder.geocode(query.location_text()).await?;
        tracing::debug!(%coordinates, "location geocoded");

        let mut candidates = self
            .search
            .search_nearby(coordinates, query.keyword(), SEARCH_RADIUS_METERS)
            .await?;

        if candidates.is_empty() {
            tracing::info!(keyword = query.keyword(), "search returned no candidates");
            return Ok(SearchOutcome::empty());
        }

        let found = candidates.len();
        candidates.truncate(query.selection_size(found));
        tracing::debug!(found, selected = candidates.len(), "candidates selected");

        let outcomes = self.enrich_selection(&candidates).await;

        let total = outcomes.len();
        let degraded = outcomes.iter().filter(|o| o.is_degraded()).count();
        let results: Vec<EnrichedContact> = outcomes
            .into_iter()
            .map(EnrichmentOutcome::into_contact)
            .collect();

        let warning = (degraded > 0).then(|| {
            format!("details could not be retrieved for {degraded} of {total} places")
        });

        tracing::info!(results = total, degraded, "lead search finished");

        Ok(SearchOutcome {
            results,
            warning,
            degraded,
        })
    }

    /// Enriches every candidate, at most `max_concurrent_details` at a time.
    ///
    /// `buffered` yields in input order regardless of completion order, so
    /// the returned `Vec` lines up index-for-index with `selection`.
    async fn enrich_selection(&self, selection: &[CandidatePlace]) -> Vec<EnrichmentOutcome> {
        let total = selection.len();
        let completed = AtomicUsize::new(0);
        let completed = &completed;

        // Owned candidates keep the returned future `Send` for axum handlers
        // and `tokio::spawn`.
        stream::iter(selection.iter().cloned())
            .map(|candidate| async move {
                let outcome = self.enrich_one(&candidate).await;
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(observer) = &self.observer {
                    observer(EnrichmentProgress {
                        completed: done,
                        total,
                    });
                }
                outcome
            })
            .buffered(self.options.max_concurrent_details.max(1))
            .collect()
            .await
    }

    async fn enrich_one(&self, candidate: &CandidatePlace) -> EnrichmentOutcome {
        let lookup = self.enricher.enrich(&candidate.external_id);
        let cause = match tokio::time::timeout(self.options.detail_timeout, lookup).await {
            Ok(Ok(detail)) => {
                return EnrichmentOutcome::Enriched(EnrichedContact::from_detail(candidate, detail));
            }
            Ok(Err(cause)) => cause,
            Err(_) => DetailUnavailable {
                place_id: candidate.external_id.clone(),
                reason: format!(
                    "timed out after {}ms",
                    self.options.detail_timeout.as_millis()
                ),
            },
        };

        tracing::warn!(
            place_id = %candidate.external_id,
            error = %cause,
            "place details unavailable, using search result"
        );
        EnrichmentOutcome::Degraded {
            contact: EnrichedContact::degraded(candidate),
            cause,
        }
    }
}

impl std::fmt::Debug for EnrichmentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnrichmentPipeline")
            .field("options", &self.options)
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_percent_rounds_down() {
        let p = EnrichmentProgress {
            completed: 1,
            total: 3,
        };
        assert_eq!(p.percent(), 33);
        let p = EnrichmentProgress {
            completed: 0,
            total: 0,
        };
        assert_eq!(p.percent(), 100);
    }

    #[test]
    fn outcome_into_contact_unwraps_both_kinds() {
        let contact = EnrichedContact {
            name: "A".to_string(),
            phone: "1".to_string(),
        };
        let enriched = EnrichmentOutcome::Enriched(contact.clone());
        assert!(!enriched.is_degraded());
        assert_eq!(enriched.into_contact(), contact);

        let degraded = EnrichmentOutcome::Degraded {
            contact: contact.clone(),
            cause: DetailUnavailable {
                place_id: "p".to_string(),
                reason: "boom".to_string(),
            },
        };
        assert!(degraded.is_degraded());
        assert_eq!(degraded.into_contact(), contact);
    }

    #[test]
    fn default_options_allow_full_selection_in_flight() {
        let options = PipelineOptions::default();
        assert_eq!(options.max_concurrent_details, MAX_SELECTION);
        assert_eq!(options.detail_timeout, Duration::from_secs(10));
    }
}
