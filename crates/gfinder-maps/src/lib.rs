//! HTTP client for the Google Maps Geocoding and Places web services.
//!
//! Covers exactly the three endpoints the lead search needs: geocode,
//! nearby search, and place details. The client performs one attempt per
//! call; callers decide how to treat each failure.

pub mod client;
pub mod error;
pub mod types;

pub use client::{MapsClient, DEFAULT_BASE_URL};
pub use error::MapsError;
pub use types::{GeocodeResult, LatLng, NearbyPlace, PlaceDetailsResult};
