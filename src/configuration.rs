use crate::connectors::ConnectorConfig;
use crate::feature_matrix::FeatureOverride;
use serde;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app_port: u16,
    pub app_host: String,
    pub auth: AuthSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub feature_matrix: FeatureMatrixSettings,
    #[serde(default)]
    pub connectors: ConnectorConfig,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AuthSettings {
    /// HS256 secret used to verify bearer tokens. `JWT_SECRET` overrides it.
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
}

fn default_token_ttl_minutes() -> i64 {
    60
}

impl AuthSettings {
    fn apply_env(&mut self) {
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            if !secret.trim().is_empty() {
                self.jwt_secret = secret;
            }
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CacheSettings {
    /// TTL for feature matrices and organization plan lookups.
    pub feature_matrix_ttl_secs: u64,
    /// TTL for asset lists.
    pub asset_list_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            feature_matrix_ttl_secs: 300,
            asset_list_ttl_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct FeatureMatrixSettings {
    #[serde(default)]
    pub overrides: Vec<FeatureOverride>,
}

impl DatabaseSettings {
    // Connection string: postgresql://<username>:<password>@<host>:<port>/<database_name>
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name,
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port,
        )
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    dotenvy::dotenv().ok();

    // configuration.yaml in the working directory, then APP__* environment overrides
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?;

    let mut config: Settings = settings.try_deserialize()?;
    config.auth.apply_env();

    Ok(config)
}
