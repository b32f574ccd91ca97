//! Integration tests for map-center read/write and auth wrappers.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pimap_client::{ApiClient, ApiError};
use pimap_core::{MapCenter, MapCenterKind, SessionUser};
use pimap_geo::Coordinate;

fn test_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, 5, "pimap-test/0.1", 0, 0).expect("failed to build test ApiClient")
}

fn test_session() -> SessionUser {
    SessionUser {
        pi_uid: "uid-1".to_owned(),
        username: "pioneer".to_owned(),
        access_token: "token-abc".to_owned(),
    }
}

// ---------------------------------------------------------------------------
// fetch_map_center
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_map_center_reads_geojson_search_center() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/map-center"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_map_center": {"type": "Point", "coordinates": [3.3792, 6.5244]},
            "sell_map_center": null
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let center = client
        .fetch_map_center(MapCenterKind::Search)
        .await
        .expect("fetch should succeed")
        .expect("search center should be present");

    assert!((center.lat - 6.5244).abs() < 1e-9);
    assert!((center.lng - 3.3792).abs() < 1e-9);
}

#[tokio::test]
async fn fetch_map_center_missing_center_is_none_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/map-center"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_map_center": null,
            "sell_map_center": null
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let center = client
        .fetch_map_center(MapCenterKind::Sell)
        .await
        .expect("fetch should succeed");

    assert!(center.is_none(), "absent center must be Ok(None)");
}

#[tokio::test]
async fn fetch_map_center_malformed_point_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/map-center"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_map_center": {"type": "Point", "coordinates": "oops"}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let center = client
        .fetch_map_center(MapCenterKind::Search)
        .await
        .expect("malformed point must degrade, not error");

    assert!(center.is_none());
}

// ---------------------------------------------------------------------------
// save_map_center
// ---------------------------------------------------------------------------

#[tokio::test]
async fn save_map_center_puts_wire_shape() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/map-center/save"))
        .and(body_json(json!({
            "latitude": 6.5244,
            "longitude": 3.3792,
            "type": "sell"
        })))
        .and(header("authorization", "Bearer token-abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = test_client(&server.uri());
    client.set_session(test_session());
    let center = MapCenter::new(Coordinate::sanitized(6.5244, 3.3792), MapCenterKind::Sell);

    client
        .save_map_center(center)
        .await
        .expect("save should succeed");
}

#[tokio::test]
async fn save_map_center_maps_401_to_unauthenticated() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/map-center/save"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let center = MapCenter::new(Coordinate::sanitized(1.0, 2.0), MapCenterKind::Search);
    let result = client.save_map_center(center).await;

    assert!(
        matches!(result, Err(ApiError::Unauthenticated { .. })),
        "expected Unauthenticated, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// auth wrappers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn authenticate_attaches_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/authenticate"))
        .and(body_json(json!({"accessToken": "pi-sdk-token"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pi_uid": "uid-1",
            "username": "pioneer",
            "token": "backend-token"
        })))
        .mount(&server)
        .await;

    let mut client = test_client(&server.uri());
    let user = client
        .authenticate("pi-sdk-token")
        .await
        .expect("authenticate should succeed");

    assert_eq!(user.username, "pioneer");
    assert_eq!(
        client.session().map(|s| s.access_token.as_str()),
        Some("backend-token")
    );
}

#[tokio::test]
async fn current_user_without_session_is_unauthenticated() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());

    let result = client.current_user().await;
    assert!(
        matches!(result, Err(ApiError::Unauthenticated { .. })),
        "expected Unauthenticated, got: {result:?}"
    );
}

#[tokio::test]
async fn current_user_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer token-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pi_uid": "uid-1",
            "username": "pioneer",
            "access_token": "token-abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = test_client(&server.uri());
    client.set_session(test_session());
    let user = client.current_user().await.expect("fetch should succeed");
    assert_eq!(user.pi_uid, "uid-1");
}
