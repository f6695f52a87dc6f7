use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "asset_condition", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AssetCondition {
    Good,
    #[default]
    Fair,
    Poor,
    Critical,
}

/// Piece of municipal infrastructure shown in the asset manager and on the map.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Asset {
    pub id: i32,
    pub organization_id: i32,
    pub name: String,
    pub category: String,
    pub condition: AssetCondition,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
