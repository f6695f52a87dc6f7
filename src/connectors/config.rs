use serde::{Deserialize, Serialize};

/// Configuration for external service connectors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    #[serde(default)]
    pub overpass: OverpassConfig,
}

/// OpenStreetMap Overpass API, used for the road network layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverpassConfig {
    /// Enable/disable live road data
    pub enabled: bool,
    /// Base URL of the Overpass instance (e.g., https://overpass-api.de)
    pub base_url: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// How long a bounding box result is reused
    pub cache_ttl_secs: u64,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://overpass-api.de".to_string(),
            timeout_secs: 30,
            cache_ttl_secs: 300,
        }
    }
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            overpass: OverpassConfig::default(),
        }
    }
}
