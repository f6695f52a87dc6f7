use super::Plan;
use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlanChange {
    pub id: i32,
    pub organization_id: i32,
    pub previous_plan: Plan,
    pub new_plan: Plan,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
}
