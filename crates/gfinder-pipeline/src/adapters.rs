//! Contracts between the pipeline and the services it calls.
//!
//! The Google Maps client implements all three (see [`crate::google`]).
//! Another source, such as a scraper for a map web UI, can be plugged in by
//! implementing the same traits.

use async_trait::async_trait;
use gfinder_core::{
    CandidatePlace, Coordinates, DetailUnavailable, GeocodeError, PlaceDetail, SearchError,
};

/// Search radius around the geocoded point. Fixed; not user-configurable.
pub const SEARCH_RADIUS_METERS: u32 = 5_000;

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves `location_text` to the first matching coordinate pair.
    async fn geocode(&self, location_text: &str) -> Result<Coordinates, GeocodeError>;
}

#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Returns every candidate the service provides, in service order.
    /// An empty `Vec` is a valid outcome, not an error.
    async fn search_nearby(
        &self,
        coordinates: Coordinates,
        keyword: &str,
        radius_meters: u32,
    ) -> Result<Vec<CandidatePlace>, SearchError>;
}

#[async_trait]
pub trait PlaceEnricher: Send + Sync {
    /// Fetches name and phone for one place. Each call is independent.
    async fn enrich(&self, external_id: &str) -> Result<PlaceDetail, DetailUnavailable>;
}
