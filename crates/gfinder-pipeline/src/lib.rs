//! Enrichment pipeline for G-Finder.
//!
//! Turns one location + keyword query into an ordered list of contacts:
//! geocode the location, search nearby places, then look up each selected
//! place's details concurrently. Failures before selection abort the
//! request; per-place detail failures degrade to fallback values.

pub mod adapters;
pub mod google;
pub mod pipeline;

pub use adapters::{Geocoder, PlaceEnricher, PlaceSearch, SEARCH_RADIUS_METERS};
pub use pipeline::{
    EnrichmentOutcome, EnrichmentPipeline, EnrichmentProgress, PipelineOptions, ProgressObserver,
    SearchOutcome,
};
