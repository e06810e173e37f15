//! HTTP client for the Google Maps web services.
//!
//! Wraps `reqwest` with API key management, status-envelope checking and
//! typed response deserialization. Every endpoint reports a `"status"`
//! field; anything other than `OK` or `ZERO_RESULTS` surfaces as
//! [`MapsError::Status`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::MapsError;
use crate::types::{
    Envelope, GeocodeBody, GeocodeResult, NearbyPlace, NearbySearchBody, PlaceDetailsBody,
    PlaceDetailsResult,
};

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/";

const GEOCODE_PATH: &str = "maps/api/geocode/json";
const NEARBY_SEARCH_PATH: &str = "maps/api/place/nearbysearch/json";
const PLACE_DETAILS_PATH: &str = "maps/api/place/details/json";

/// Fields requested from the details endpoint. Keeping the mask narrow keeps
/// the call in the cheapest billing tier.
const DETAIL_FIELDS: &str = "name,formatted_phone_number";

/// Client for the Google Maps Geocoding and Places APIs.
///
/// Use [`MapsClient::new`] for production or [`MapsClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Clone)]
pub struct MapsClient {
    client: Client,
    api_key: String,
    base_url: Url,
    language: Option<String>,
}

impl std::fmt::Debug for MapsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl MapsClient {
    /// Creates a client pointed at the production Google Maps API.
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, MapsError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`MapsError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, MapsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends the endpoint path
        // instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| MapsError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            language: None,
        })
    }

    /// Sets the `language` parameter sent with every request.
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    /// Resolves free-text `address` to candidate locations, best match first.
    ///
    /// `ZERO_RESULTS` yields an empty `Vec`.
    ///
    /// # Errors
    ///
    /// - [`MapsError::Status`] if the API returns any other non-`OK` status.
    /// - [`MapsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`MapsError::Deserialize`] if the body does not match the expected shape.
    pub async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, MapsError> {
        let url = self.build_url(GEOCODE_PATH, &[("address", address)])?;
        let envelope: Envelope<GeocodeBody> = self.request("geocode", &url).await?;
        if Self::check_status("geocode", &envelope)? {
            return Ok(Vec::new());
        }
        Ok(envelope.body.results)
    }

    /// Finds places matching `keyword` within `radius_meters` of a point.
    ///
    /// Returns the first result page only (at most 20 places).
    /// `ZERO_RESULTS` yields an empty `Vec`.
    ///
    /// # Errors
    ///
    /// - [`MapsError::Status`] if the API returns any other non-`OK` status.
    /// - [`MapsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`MapsError::Deserialize`] if the body does not match the expected shape.
    pub async fn nearby_search(
        &self,
        lat: f64,
        lng: f64,
        radius_meters: u32,
        keyword: &str,
    ) -> Result<Vec<NearbyPlace>, MapsError> {
        let location = format!("{lat},{lng}");
        let radius = radius_meters.to_string();
        let url = self.build_url(
            NEARBY_SEARCH_PATH,
            &[
                ("location", &location),
                ("radius", &radius),
                ("keyword", keyword),
            ],
        )?;
        let envelope: Envelope<NearbySearchBody> = self.request("nearbysearch", &url).await?;
        if Self::check_status("nearbysearch", &envelope)? {
            return Ok(Vec::new());
        }
        Ok(envelope.body.results)
    }

    /// Fetches the name and formatted phone number of one place.
    ///
    /// # Errors
    ///
    /// - [`MapsError::Status`] for any non-`OK` status, including
    ///   `ZERO_RESULTS` and `NOT_FOUND`.
    /// - [`MapsError::MissingResult`] if an `OK` response has no `result`.
    /// - [`MapsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`MapsError::Deserialize`] if the body does not match the expected shape.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetailsResult, MapsError> {
        let url = self.build_url(
            PLACE_DETAILS_PATH,
            &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
        )?;
        let envelope: Envelope<PlaceDetailsBody> = self.request("details", &url).await?;
        if envelope.status != "OK" {
            return Err(Self::status_error("details", &envelope));
        }
        envelope
            .body
            .result
            .ok_or(MapsError::MissingResult { endpoint: "details" })
    }

    /// Builds the endpoint URL with percent-encoded query parameters, the
    /// API key, and the optional language.
    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Result<Url, MapsError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| MapsError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            if let Some(language) = &self.language {
                pairs.append_pair("language", language);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body.
    ///
    /// `reqwest` errors are stripped of their URL because it carries the key.
    async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &Url,
    ) -> Result<Envelope<T>, MapsError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| MapsError::Http(e.without_url()))?;
        let body = response
            .text()
            .await
            .map_err(|e| MapsError::Http(e.without_url()))?;
        serde_json::from_str(&body).map_err(|e| MapsError::Deserialize {
            context: endpoint.to_string(),
            source: e,
        })
    }

    /// Returns `Ok(true)` for `ZERO_RESULTS`, `Ok(false)` for `OK`, and an
    /// error for every other status.
    fn check_status<T>(endpoint: &'static str, envelope: &Envelope<T>) -> Result<bool, MapsError> {
        match envelope.status.as_str() {
            "OK" => Ok(false),
            "ZERO_RESULTS" => Ok(true),
            _ => Err(Self::status_error(endpoint, envelope)),
        }
    }

    fn status_error<T>(endpoint: &'static str, envelope: &Envelope<T>) -> MapsError {
        tracing::debug!(
            endpoint,
            status = %envelope.status,
            "maps API returned non-OK status"
        );
        MapsError::Status {
            endpoint,
            status: envelope.status.clone(),
            message: envelope
                .error_message
                .clone()
                .unwrap_or_else(|| "no error message".to_string()),
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
