use super::*;

fn test_client(base_url: &str) -> MapsClient {
    MapsClient::with_base_url("test-key", 5, "g-finder-test/0.1", base_url)
        .expect("client construction should not fail")
}

#[test]
fn build_url_appends_endpoint_path_and_key() {
    let client = test_client("https://maps.googleapis.com");
    let url = client
        .build_url(GEOCODE_PATH, &[("address", "01310-100")])
        .expect("url");
    assert_eq!(
        url.as_str(),
        "https://maps.googleapis.com/maps/api/geocode/json?address=01310-100&key=test-key"
    );
}

#[test]
fn build_url_keeps_base_path_prefix() {
    let client = test_client("http://localhost:8080/proxy/");
    let url = client
        .build_url(PLACE_DETAILS_PATH, &[("place_id", "abc")])
        .expect("url");
    assert_eq!(
        url.as_str(),
        "http://localhost:8080/proxy/maps/api/place/details/json?place_id=abc&key=test-key"
    );
}

#[test]
fn build_url_encodes_special_characters() {
    let client = test_client("https://maps.googleapis.com");
    let url = client
        .build_url(NEARBY_SEARCH_PATH, &[("keyword", "pão & café")])
        .expect("url");
    assert!(
        url.as_str().contains("keyword=p%C3%A3o+%26+caf%C3%A9"),
        "keyword should be percent-encoded: {url}"
    );
}

#[test]
fn build_url_adds_language_before_key() {
    let client = test_client("https://maps.googleapis.com").with_language(Some("pt-BR".into()));
    let url = client
        .build_url(GEOCODE_PATH, &[("address", "x")])
        .expect("url");
    assert!(url.as_str().ends_with("address=x&language=pt-BR&key=test-key"));
}

#[test]
fn with_base_url_rejects_garbage() {
    let err = MapsClient::with_base_url("k", 5, "ua", "not a url").unwrap_err();
    assert!(matches!(err, MapsError::InvalidBaseUrl { .. }));
}

#[test]
fn debug_output_redacts_api_key() {
    let client = test_client("https://maps.googleapis.com");
    let rendered = format!("{client:?}");
    assert!(!rendered.contains("test-key"));
}
