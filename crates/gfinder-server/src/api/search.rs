use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use gfinder_core::{EnrichedContact, ErrorKind, SearchRequest};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct SearchResponse {
    pub results: Vec<EnrichedContact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub meta: ResponseMeta,
}

pub(super) async fn run_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        tracing::info!(error = %rejection, "search body rejected");
        ApiError::new(
            req_id.0.clone(),
            ErrorKind::InvalidQuery,
            format!("invalid query: {}", rejection.body_text()),
        )
    })?;

    let outcome = state
        .pipeline
        .run(request)
        .await
        .map_err(|e| ApiError::from_pipeline(req_id.0.clone(), &e))?;

    Ok(Json(SearchResponse {
        results: outcome.results,
        warning: outcome.warning,
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use gfinder_core::{GeocodeError, SearchError, NO_PHONE_AVAILABLE};
    use tower::ServiceExt;

    use crate::api::test_support::{app_with, body_json, json_request, FakeMaps};

    const BODY: &str = r#"{"locationText":"01310-100","keyword":"padaria","desiredCount":5}"#;

    #[tokio::test]
    async fn search_returns_results_in_order() {
        let response = app_with(FakeMaps::with_places(8))
            .oneshot(json_request("POST", "/api/search", BODY))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let results = json["results"].as_array().expect("results array");
        assert_eq!(results.len(), 5);
        assert_eq!(results[0]["name"], "Detail p0");
        assert_eq!(results[4]["phone"], "(11) 0000-p4");
        assert!(json.get("warning").is_none());
        assert!(json["meta"]["requestId"].is_string());
    }

    #[tokio::test]
    async fn degraded_detail_adds_warning() {
        let mut fake = FakeMaps::with_places(5);
        fake.failing_detail = Some("p3");
        let response = app_with(fake)
            .oneshot(json_request("POST", "/api/search", BODY))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["results"][3]["name"], "Place 3");
        assert_eq!(json["results"][3]["phone"], NO_PHONE_AVAILABLE);
        assert_eq!(
            json["warning"],
            "details could not be retrieved for 1 of 5 places"
        );
    }

    #[tokio::test]
    async fn legacy_field_names_are_accepted() {
        let response = app_with(FakeMaps::with_places(3))
            .oneshot(json_request(
                "POST",
                "/api/search",
                r#"{"cep":"01310-100","keyword":"bar","clientCount":2}"#,
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["results"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn blank_keyword_is_invalid_query() {
        let response = app_with(FakeMaps::with_places(3))
            .oneshot(json_request(
                "POST",
                "/api/search",
                r#"{"locationText":"01310-100","keyword":"  ","desiredCount":2}"#,
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["errorKind"], "InvalidQuery");
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_query() {
        let response = app_with(FakeMaps::with_places(3))
            .oneshot(json_request("POST", "/api/search", "{not json"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["errorKind"], "InvalidQuery");
        assert!(json["meta"]["requestId"].is_string());
    }

    #[tokio::test]
    async fn unknown_location_is_not_found() {
        let mut fake = FakeMaps::with_places(3);
        fake.geocode = Err(GeocodeError::LocationNotFound {
            location: "01310-100".to_string(),
        });
        let response = app_with(fake)
            .oneshot(json_request("POST", "/api/search", BODY))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["errorKind"], "LocationNotFound");
    }

    #[tokio::test]
    async fn search_failure_is_bad_gateway() {
        let mut fake = FakeMaps::with_places(3);
        fake.search = Err(SearchError::SearchFailed("REQUEST_DENIED".to_string()));
        let response = app_with(fake)
            .oneshot(json_request("POST", "/api/search", BODY))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["errorKind"], "SearchFailed");
    }

    #[tokio::test]
    async fn upstream_outage_is_service_unavailable() {
        let mut fake = FakeMaps::with_places(3);
        fake.geocode = Err(GeocodeError::UpstreamUnavailable("connection refused".to_string()));
        let response = app_with(fake)
            .oneshot(json_request("POST", "/api/search", BODY))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["errorKind"], "UpstreamUnavailable");
    }

    #[tokio::test]
    async fn zero_candidates_is_empty_success() {
        let response = app_with(FakeMaps::with_places(0))
            .oneshot(json_request("POST", "/api/search", BODY))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["results"].as_array().map(Vec::len), Some(0));
    }
}
