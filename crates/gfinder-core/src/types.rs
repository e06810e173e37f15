use serde::{Deserialize, Serialize};

/// Phone value used when a place has no phone number or its details could
/// not be retrieved.
pub const NO_PHONE_AVAILABLE: &str = "no phone available";

/// A resolved latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// A place returned by the nearby search, before detail enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePlace {
    /// Opaque, service-assigned identifier; unique within one search response.
    pub external_id: String,
    /// May be empty when the search service omitted the name.
    pub display_name: String,
}

/// Supplementary fields fetched for a single place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceDetail {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl PlaceDetail {
    /// Builds a detail record, treating blank strings as absent.
    #[must_use]
    pub fn new(name: Option<String>, phone: Option<String>) -> Self {
        Self {
            name: non_blank(name),
            phone: non_blank(phone),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// One row of the final result list.
///
/// Deserialization also accepts the legacy `nome` / `telefone` keys so
/// result lists produced by older front ends can still be exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedContact {
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "telefone")]
    pub phone: String,
}

impl EnrichedContact {
    /// Merges a successful detail lookup with the candidate it was issued for.
    ///
    /// Detail fields win; the candidate's display name and the
    /// [`NO_PHONE_AVAILABLE`] sentinel fill whatever the detail omitted.
    #[must_use]
    pub fn from_detail(candidate: &CandidatePlace, detail: PlaceDetail) -> Self {
        Self {
            name: detail
                .name
                .unwrap_or_else(|| candidate.display_name.clone()),
            phone: detail
                .phone
                .unwrap_or_else(|| NO_PHONE_AVAILABLE.to_owned()),
        }
    }

    /// Fallback record used when the detail lookup for `candidate` failed.
    #[must_use]
    pub fn degraded(candidate: &CandidatePlace) -> Self {
        Self {
            name: candidate.display_name.clone(),
            phone: NO_PHONE_AVAILABLE.to_owned(),
        }
    }

    #[must_use]
    pub fn has_phone(&self) -> bool {
        self.phone != NO_PHONE_AVAILABLE
    }
}
