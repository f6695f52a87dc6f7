use civicdesk::connectors::{ConnectorError, OverpassClient, OverpassConfig, RoadDataConnector};
use civicdesk::models::BoundingBox;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> OverpassConfig {
    OverpassConfig {
        enabled: true,
        base_url: server.uri(),
        timeout_secs: 5,
        cache_ttl_secs: 60,
    }
}

fn downtown() -> BoundingBox {
    BoundingBox {
        south: 52.50,
        west: 13.38,
        north: 52.52,
        east: 13.42,
    }
}

fn overpass_body() -> serde_json::Value {
    json!({
        "version": 0.6,
        "elements": [
            {
                "type": "way",
                "id": 101,
                "tags": { "highway": "primary", "name": "Unter den Linden" },
                "geometry": [
                    { "lat": 52.5170, "lon": 13.3889 },
                    { "lat": 52.5163, "lon": 13.3958 }
                ]
            },
            {
                "type": "way",
                "id": 102,
                "tags": { "building": "yes" },
                "geometry": [
                    { "lat": 52.51, "lon": 13.39 },
                    { "lat": 52.52, "lon": 13.40 }
                ]
            },
            {
                "type": "way",
                "id": 103,
                "tags": { "highway": "footway" },
                "geometry": [{ "lat": 52.51, "lon": 13.39 }]
            },
            { "type": "node", "id": 7, "lat": 52.51, "lon": 13.39 }
        ]
    })
}

#[tokio::test]
async fn roads_are_parsed_and_cached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .and(body_string_contains("highway"))
        .respond_with(ResponseTemplate::new(200).set_body_json(overpass_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OverpassClient::new(&config(&server)).unwrap();

    let roads = client.roads(downtown()).await.unwrap();
    assert_eq!(roads.len(), 1);
    assert_eq!(roads[0].id, 101);
    assert_eq!(roads[0].highway, "primary");
    assert_eq!(roads[0].name.as_deref(), Some("Unter den Linden"));
    assert_eq!(roads[0].coordinates[0], [13.3889, 52.5170]);

    // second call is served from the cache; the mock allows one hit only
    let again = client.roads(downtown()).await.unwrap();
    assert_eq!(again, roads);
}

#[tokio::test]
async fn rate_limit_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let client = OverpassClient::new(&config(&server)).unwrap();
    let err = client.roads(downtown()).await.unwrap_err();
    assert!(matches!(err, ConnectorError::RateLimited(_)));
}

#[tokio::test]
async fn errors_are_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(504))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(overpass_body()))
        .mount(&server)
        .await;

    let client = OverpassClient::new(&config(&server)).unwrap();
    let err = client.roads(downtown()).await.unwrap_err();
    assert!(matches!(err, ConnectorError::ServiceUnavailable(_)));

    let roads = client.roads(downtown()).await.unwrap();
    assert_eq!(roads.len(), 1);
}

#[tokio::test]
async fn garbage_body_is_an_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let client = OverpassClient::new(&config(&server)).unwrap();
    let err = client.roads(downtown()).await.unwrap_err();
    assert!(matches!(err, ConnectorError::InvalidResponse(_)));
}

#[tokio::test]
async fn oversized_box_never_reaches_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(overpass_body()))
        .expect(0)
        .mount(&server)
        .await;

    let client = OverpassClient::new(&config(&server)).unwrap();
    let err = client
        .roads(BoundingBox {
            south: 50.0,
            west: 10.0,
            north: 53.0,
            east: 14.0,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ConnectorError::BadRequest(_)));
}
