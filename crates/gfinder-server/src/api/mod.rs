mod export;
mod search;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use gfinder_core::{ErrorKind, PipelineError};
use gfinder_pipeline::EnrichmentPipeline;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<EnrichmentPipeline>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

/// Error body returned by every endpoint: `{ message, errorKind, meta }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub message: String,
    pub error_kind: &'static str,
    pub meta: ResponseMeta,
    #[serde(skip)]
    status: StatusCode,
}

impl ApiError {
    pub fn new(request_id: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_kind: kind.as_str(),
            meta: ResponseMeta::new(request_id.into()),
            status: status_for(kind),
        }
    }

    /// Failure inside this service rather than in the caller's input or an
    /// upstream dependency.
    pub fn internal(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_kind: "InternalError",
            meta: ResponseMeta::new(request_id.into()),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub(super) fn from_pipeline(request_id: String, error: &PipelineError) -> Self {
        match error {
            PipelineError::InvalidQuery(_) | PipelineError::LocationNotFound(_) => {
                tracing::info!(error = %error, "search rejected");
            }
            PipelineError::SearchFailed(_) | PipelineError::UpstreamUnavailable(_) => {
                tracing::error!(error = %error, "search failed");
            }
        }
        Self::new(request_id, error.kind(), error.to_string())
    }
}

pub(super) fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidQuery => StatusCode::BAD_REQUEST,
        ErrorKind::LocationNotFound => StatusCode::NOT_FOUND,
        ErrorKind::SearchFailed => StatusCode::BAD_GATEWAY,
        ErrorKind::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/search", post(search::run_search))
        .route("/api/export", post(export::export_results))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, Response};
    use gfinder_core::{
        CandidatePlace, Coordinates, DetailUnavailable, GeocodeError, PlaceDetail, SearchError,
    };
    use gfinder_pipeline::{
        EnrichmentPipeline, Geocoder, PipelineOptions, PlaceEnricher, PlaceSearch,
    };

    use super::{build_app, AppState};

    /// One fake standing in for all three services.
    pub struct FakeMaps {
        pub geocode: Result<Coordinates, GeocodeError>,
        pub search: Result<Vec<CandidatePlace>, SearchError>,
        pub failing_detail: Option<&'static str>,
    }

    impl FakeMaps {
        pub fn with_places(count: usize) -> Self {
            Self {
                geocode: Ok(Coordinates {
                    latitude: -23.56,
                    longitude: -46.65,
                }),
                search: Ok((0..count)
                    .map(|i| CandidatePlace {
                        external_id: format!("p{i}"),
                        display_name: format!("Place {i}"),
                    })
                    .collect()),
                failing_detail: None,
            }
        }
    }

    #[async_trait]
    impl Geocoder for FakeMaps {
        async fn geocode(&self, _location_text: &str) -> Result<Coordinates, GeocodeError> {
            self.geocode.clone()
        }
    }

    #[async_trait]
    impl PlaceSearch for FakeMaps {
        async fn search_nearby(
            &self,
            _coordinates: Coordinates,
            _keyword: &str,
            _radius_meters: u32,
        ) -> Result<Vec<CandidatePlace>, SearchError> {
            self.search.clone()
        }
    }

    #[async_trait]
    impl PlaceEnricher for FakeMaps {
        async fn enrich(&self, external_id: &str) -> Result<PlaceDetail, DetailUnavailable> {
            if self.failing_detail == Some(external_id) {
                return Err(DetailUnavailable {
                    place_id: external_id.to_string(),
                    reason: "HTTP 500".to_string(),
                });
            }
            Ok(PlaceDetail::new(
                Some(format!("Detail {external_id}")),
                Some(format!("(11) 0000-{external_id}")),
            ))
        }
    }

    pub fn app_with(fake: FakeMaps) -> axum::Router {
        let fake = Arc::new(fake);
        let pipeline = EnrichmentPipeline::new(
            fake.clone(),
            fake.clone(),
            fake,
            PipelineOptions::default(),
        );
        build_app(AppState {
            pipeline: Arc::new(pipeline),
        })
    }

    pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .expect("request")
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json parse")
    }
}
