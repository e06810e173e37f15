//! Adapter implementations backed by [`MapsClient`].
//!
//! This is where raw Google statuses are classified into the adapter error
//! kinds the pipeline understands.

use async_trait::async_trait;
use gfinder_core::{
    CandidatePlace, Coordinates, DetailUnavailable, GeocodeError, PlaceDetail, SearchError,
};
use gfinder_maps::{MapsClient, MapsError};

use crate::adapters::{Geocoder, PlaceEnricher, PlaceSearch};

/// Geocoding statuses meaning "this location text does not resolve".
/// Every other non-`OK` status is treated as the service being unavailable.
const LOCATION_NOT_FOUND_STATUSES: &[&str] = &["ZERO_RESULTS", "INVALID_REQUEST", "NOT_FOUND"];

#[async_trait]
impl Geocoder for MapsClient {
    async fn geocode(&self, location_text: &str) -> Result<Coordinates, GeocodeError> {
        let results = MapsClient::geocode(self, location_text)
            .await
            .map_err(|e| classify_geocode_error(location_text, &e))?;

        let first = results
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::LocationNotFound {
                location: location_text.to_owned(),
            })?;

        Ok(Coordinates {
            latitude: first.geometry.location.lat,
            longitude: first.geometry.location.lng,
        })
    }
}

#[async_trait]
impl PlaceSearch for MapsClient {
    async fn search_nearby(
        &self,
        coordinates: Coordinates,
        keyword: &str,
        radius_meters: u32,
    ) -> Result<Vec<CandidatePlace>, SearchError> {
        let places = self
            .nearby_search(
                coordinates.latitude,
                coordinates.longitude,
                radius_meters,
                keyword,
            )
            .await
            .map_err(|e| classify_search_error(&e))?;

        Ok(places
            .into_iter()
            .map(|p| CandidatePlace {
                external_id: p.place_id,
                display_name: p.name.unwrap_or_default(),
            })
            .collect())
    }
}

#[async_trait]
impl PlaceEnricher for MapsClient {
    async fn enrich(&self, external_id: &str) -> Result<PlaceDetail, DetailUnavailable> {
        let details = self
            .place_details(external_id)
            .await
            .map_err(|e| DetailUnavailable {
                place_id: external_id.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(PlaceDetail::new(details.name, details.formatted_phone_number))
    }
}

fn classify_geocode_error(location_text: &str, err: &MapsError) -> GeocodeError {
    match err.status() {
        Some(status) if LOCATION_NOT_FOUND_STATUSES.contains(&status) => {
            GeocodeError::LocationNotFound {
                location: location_text.to_owned(),
            }
        }
        _ => GeocodeError::UpstreamUnavailable(err.to_string()),
    }
}

fn classify_search_error(err: &MapsError) -> SearchError {
    match err {
        MapsError::Http(_) | MapsError::InvalidBaseUrl { .. } => {
            SearchError::UpstreamUnavailable(err.to_string())
        }
        MapsError::Status { .. } | MapsError::MissingResult { .. } | MapsError::Deserialize { .. } => {
            SearchError::SearchFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: &str) -> MapsError {
        MapsError::Status {
            endpoint: "geocode",
            status: status.to_string(),
            message: "no error message".to_string(),
        }
    }

    fn deserialize_error() -> MapsError {
        let source = serde_json::from_str::<()>("invalid").unwrap_err();
        MapsError::Deserialize {
            context: "nearbysearch".to_string(),
            source,
        }
    }

    #[test]
    fn invalid_location_statuses_are_not_found() {
        for status in ["ZERO_RESULTS", "INVALID_REQUEST", "NOT_FOUND"] {
            let err = classify_geocode_error("00000-000", &status_error(status));
            assert_eq!(
                err,
                GeocodeError::LocationNotFound {
                    location: "00000-000".to_string()
                },
                "status {status}"
            );
        }
    }

    #[test]
    fn refusal_statuses_are_upstream_unavailable() {
        for status in ["REQUEST_DENIED", "OVER_QUERY_LIMIT", "UNKNOWN_ERROR"] {
            let err = classify_geocode_error("01310-100", &status_error(status));
            assert!(
                matches!(err, GeocodeError::UpstreamUnavailable(_)),
                "status {status} gave {err:?}"
            );
        }
    }

    #[test]
    fn undecodable_geocode_body_is_upstream_unavailable() {
        let err = classify_geocode_error("01310-100", &deserialize_error());
        assert!(matches!(err, GeocodeError::UpstreamUnavailable(_)));
    }

    #[test]
    fn search_status_and_decode_errors_are_search_failed() {
        assert!(matches!(
            classify_search_error(&status_error("REQUEST_DENIED")),
            SearchError::SearchFailed(_)
        ));
        assert!(matches!(
            classify_search_error(&deserialize_error()),
            SearchError::SearchFailed(_)
        ));
    }

    #[test]
    fn search_bad_base_url_is_upstream_unavailable() {
        let err = classify_search_error(&MapsError::InvalidBaseUrl {
            base_url: "x".to_string(),
            reason: "relative URL without a base".to_string(),
        });
        assert!(matches!(err, SearchError::UpstreamUnavailable(_)));
    }
}
