//! Road network from the OpenStreetMap Overpass API.

use super::config::{ConnectorConfig, OverpassConfig};
use super::errors::ConnectorError;
use crate::helpers::TtlCache;
use crate::models::{BoundingBox, RoadSegment};
use actix_web::web;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

#[async_trait]
pub trait RoadDataConnector: Send + Sync {
    async fn roads(&self, bbox: BoundingBox) -> Result<Vec<RoadSegment>, ConnectorError>;
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    id: i64,
    #[serde(default)]
    tags: std::collections::HashMap<String, String>,
    #[serde(default)]
    geometry: Vec<OverpassPoint>,
}

#[derive(Debug, Deserialize)]
struct OverpassPoint {
    lat: f64,
    lon: f64,
}

impl OverpassResponse {
    fn into_segments(self) -> Vec<RoadSegment> {
        self.elements
            .into_iter()
            .filter(|element| element.kind == "way" && element.geometry.len() >= 2)
            .filter_map(|mut element| {
                let highway = element.tags.remove("highway")?;
                Some(RoadSegment {
                    id: element.id,
                    name: element.tags.remove("name"),
                    highway,
                    coordinates: element
                        .geometry
                        .iter()
                        .map(|point| [point.lon, point.lat])
                        .collect(),
                })
            })
            .collect()
    }
}

/// Overpass QL for every highway way inside the box, with inline geometry.
pub fn build_query(bbox: &BoundingBox, timeout_secs: u64) -> String {
    format!(
        "[out:json][timeout:{}];way[\"highway\"]({},{},{},{});out geom;",
        timeout_secs, bbox.south, bbox.west, bbox.north, bbox.east
    )
}

pub struct OverpassClient {
    base_url: String,
    http_client: reqwest::Client,
    timeout_secs: u64,
    cache: TtlCache<String, Vec<RoadSegment>>,
    user_agent: String,
}

impl OverpassClient {
    pub fn new(config: &OverpassConfig) -> Result<Self, ConnectorError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|err| ConnectorError::Internal(format!("HTTP client error: {}", err)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
            timeout_secs: config.timeout_secs.max(1),
            cache: TtlCache::new(Duration::from_secs(config.cache_ttl_secs)),
            user_agent: format!("civicdesk-overpass-client/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    async fn fetch(&self, bbox: &BoundingBox) -> Result<Vec<RoadSegment>, ConnectorError> {
        let query = build_query(bbox, self.timeout_secs);
        let span = tracing::info_span!("overpass_http_request", bbox = %bbox.cache_key());

        let resp = self
            .http_client
            .post(format!("{}/api/interpreter", self.base_url))
            .header("User-Agent", &self.user_agent)
            .form(&[("data", query)])
            .send()
            .instrument(span)
            .await?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|err| ConnectorError::HttpError(err.to_string()))?;

        match status {
            status if status.is_success() => serde_json::from_str::<OverpassResponse>(&text)
                .map(OverpassResponse::into_segments)
                .map_err(|err| {
                    tracing::error!("Overpass returned unparseable body: {:?}", err);
                    ConnectorError::InvalidResponse(err.to_string())
                }),
            StatusCode::BAD_REQUEST => Err(ConnectorError::BadRequest(text)),
            StatusCode::TOO_MANY_REQUESTS => Err(ConnectorError::RateLimited(text)),
            status if status.is_server_error() => Err(ConnectorError::ServiceUnavailable(format!(
                "Overpass error {}",
                status
            ))),
            status => Err(ConnectorError::HttpError(format!(
                "Overpass error {}: {}",
                status, text
            ))),
        }
    }
}

#[async_trait]
impl RoadDataConnector for OverpassClient {
    async fn roads(&self, bbox: BoundingBox) -> Result<Vec<RoadSegment>, ConnectorError> {
        bbox.validate().map_err(ConnectorError::BadRequest)?;

        self.cache
            .get_or_try_insert_with(bbox.cache_key(), || self.fetch(&bbox))
            .await
    }
}

/// Used when live road data is switched off.
pub struct DisabledRoadData;

#[async_trait]
impl RoadDataConnector for DisabledRoadData {
    async fn roads(&self, _bbox: BoundingBox) -> Result<Vec<RoadSegment>, ConnectorError> {
        Err(ConnectorError::ServiceUnavailable(
            "Road data connector is disabled".to_string(),
        ))
    }
}

pub fn init(connector_config: &ConnectorConfig) -> web::Data<Arc<dyn RoadDataConnector>> {
    let config = &connector_config.overpass;
    let connector: Arc<dyn RoadDataConnector> = if config.enabled {
        match OverpassClient::new(config) {
            Ok(client) => {
                tracing::info!("Overpass connector initialized ({})", config.base_url);
                Arc::new(client)
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to initialize Overpass connector");
                Arc::new(DisabledRoadData)
            }
        }
    } else {
        tracing::warn!("Overpass connector disabled - road network has no live data");
        Arc::new(DisabledRoadData)
    };

    web::Data::new(connector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_contains_bbox_in_overpass_order() {
        let bbox = BoundingBox {
            south: 52.5,
            west: 13.38,
            north: 52.53,
            east: 13.42,
        };
        let query = build_query(&bbox, 25);
        assert!(query.starts_with("[out:json][timeout:25];"));
        assert!(query.contains("(52.5,13.38,52.53,13.42)"));
        assert!(query.ends_with("out geom;"));
    }

    #[test]
    fn response_keeps_only_highway_ways_with_geometry() {
        let body = r#"{
            "elements": [
                {"type": "way", "id": 1, "tags": {"highway": "residential", "name": "Elm Street"},
                 "geometry": [{"lat": 52.50, "lon": 13.40}, {"lat": 52.51, "lon": 13.41}]},
                {"type": "way", "id": 2, "tags": {"building": "yes"},
                 "geometry": [{"lat": 52.50, "lon": 13.40}, {"lat": 52.51, "lon": 13.41}]},
                {"type": "way", "id": 3, "tags": {"highway": "service"},
                 "geometry": [{"lat": 52.50, "lon": 13.40}]},
                {"type": "node", "id": 4, "lat": 52.5, "lon": 13.4}
            ]
        }"#;
        let segments = serde_json::from_str::<OverpassResponse>(body)
            .unwrap()
            .into_segments();

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].id, 1);
        assert_eq!(segments[0].name.as_deref(), Some("Elm Street"));
        assert_eq!(segments[0].coordinates[0], [13.40, 52.50]);
    }

    #[tokio::test]
    async fn disabled_connector_is_unavailable() {
        let bbox = BoundingBox {
            south: 52.5,
            west: 13.38,
            north: 52.53,
            east: 13.42,
        };
        let err = DisabledRoadData.roads(bbox).await.unwrap_err();
        assert!(matches!(err, ConnectorError::ServiceUnavailable(_)));
    }
}
