//! Integration tests for the IP-geolocation and geocoding collaborators.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pimap_client::{ApiError, Geocoder, IpLocator};

// ---------------------------------------------------------------------------
// IpLocator
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ip_lookup_reads_lat_lon_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "lat": 6.5244,
            "lon": 3.3792
        })))
        .mount(&server)
        .await;

    let locator = IpLocator::new(&format!("{}/json", server.uri()), 5, "pimap-test/0.1")
        .expect("locator should build");
    let coord = locator.lookup().await.expect("lookup should succeed");

    assert!((coord.lat - 6.5244).abs() < 1e-9);
    assert!((coord.lng - 3.3792).abs() < 1e-9);
}

#[tokio::test]
async fn ip_lookup_without_coordinates_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "fail"})))
        .mount(&server)
        .await;

    let locator = IpLocator::new(&format!("{}/json", server.uri()), 5, "pimap-test/0.1")
        .expect("locator should build");
    let result = locator.lookup().await;

    assert!(
        matches!(result, Err(ApiError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn ip_lookup_surfaces_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let locator = IpLocator::new(&format!("{}/json", server.uri()), 5, "pimap-test/0.1")
        .expect("locator should build");
    let result = locator.lookup().await;

    assert!(
        matches!(result, Err(ApiError::UnexpectedStatus { status: 503, .. })),
        "expected UnexpectedStatus(503), got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Geocoder
// ---------------------------------------------------------------------------

#[tokio::test]
async fn geocode_returns_first_hit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Lagos"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"lat": "6.4550", "lon": "3.3841", "display_name": "Lagos, Nigeria"}
        ])))
        .mount(&server)
        .await;

    let geocoder =
        Geocoder::new(&server.uri(), 5, "pimap-test/0.1").expect("geocoder should build");
    let coord = geocoder
        .search("Lagos")
        .await
        .expect("search should succeed")
        .expect("Lagos should geocode");

    assert!((coord.lat - 6.455).abs() < 1e-9);
    assert!((coord.lng - 3.3841).abs() < 1e-9);
}

#[tokio::test]
async fn geocode_empty_results_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let geocoder =
        Geocoder::new(&server.uri(), 5, "pimap-test/0.1").expect("geocoder should build");
    let result = geocoder
        .search("nowhere-at-all-xyz")
        .await
        .expect("empty result set is not an error");

    assert!(result.is_none());
}

#[tokio::test]
async fn geocode_percent_encodes_the_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Port Harcourt, Nigeria"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"lat": "4.8156", "lon": "7.0498"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let geocoder =
        Geocoder::new(&server.uri(), 5, "pimap-test/0.1").expect("geocoder should build");
    let coord = geocoder
        .search("Port Harcourt, Nigeria")
        .await
        .expect("search should succeed")
        .expect("place should geocode");

    assert!((coord.lat - 4.8156).abs() < 1e-9);
}
