use crate::models;
use crate::models::AssetCondition;
use chrono::Utc;
use serde_derive::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AssetForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 200)]
    pub name: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 100)]
    pub category: String,
    #[serde(default)]
    pub condition: AssetCondition,
    #[validate(minimum = -90.0)]
    #[validate(maximum = 90.0)]
    pub latitude: f64,
    #[validate(minimum = -180.0)]
    #[validate(maximum = 180.0)]
    pub longitude: f64,
}

impl AssetForm {
    pub fn into_model(self, organization_id: i32) -> models::Asset {
        models::Asset {
            id: 0,
            organization_id,
            name: self.name.trim().to_string(),
            category: self.category.trim().to_lowercase(),
            condition: self.condition,
            latitude: self.latitude,
            longitude: self.longitude,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
