use atlunch_core::Coordinate;

use super::*;

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 30, "atlunch-test", base_url)
        .expect("client construction should not fail")
}

fn taos_request() -> NearbyRequest {
    NearbyRequest {
        location: Coordinate::new(36.408_108, -105.572_679).unwrap(),
        radius_meters: 500,
        category: "restaurant".to_string(),
    }
}

#[test]
fn build_url_constructs_correct_query_string() {
    let client = test_client("https://maps.example.com/api/place");
    let url = client.build_url(&taos_request()).unwrap();
    assert_eq!(
        url.as_str(),
        "https://maps.example.com/api/place/nearbysearch/json?location=36.408108%2C-105.572679&radius=500&type=restaurant&business_status=OPERATIONAL&key=test-key"
    );
}

#[test]
fn build_url_tolerates_trailing_slash() {
    let with_slash = test_client("https://maps.example.com/api/place/");
    let without = test_client("https://maps.example.com/api/place");
    assert_eq!(
        with_slash.build_url(&taos_request()).unwrap(),
        without.build_url(&taos_request()).unwrap()
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = PlacesClient::with_base_url("k", 30, "ua", "not a url");
    assert!(matches!(result, Err(PlacesError::InvalidBaseUrl { .. })));
}

#[test]
fn check_status_accepts_zero_results() {
    let envelope = NearbySearchResponse {
        status: "ZERO_RESULTS".to_string(),
        results: vec![],
        error_message: None,
    };
    assert!(PlacesClient::check_status(&envelope).is_ok());
}

#[test]
fn check_status_surfaces_error_message() {
    let envelope = NearbySearchResponse {
        status: "REQUEST_DENIED".to_string(),
        results: vec![],
        error_message: Some("The provided API key is invalid.".to_string()),
    };
    let err = PlacesClient::check_status(&envelope).unwrap_err();
    assert!(
        matches!(err, PlacesError::ApiError { ref status, ref message }
            if status == "REQUEST_DENIED" && message.contains("invalid")),
        "got: {err:?}"
    );
}
