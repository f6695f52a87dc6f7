use super::Plan;
use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "organization_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrganizationStatus {
    #[default]
    Active,
    Suspended,
    Cancelled,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub plan: Plan,
    pub status: OrganizationStatus,
    pub contact_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    /// Suspended and cancelled organizations keep their plan on record but
    /// are gated as free until reactivated.
    pub fn effective_plan(&self) -> Plan {
        match self.status {
            OrganizationStatus::Active => self.plan,
            _ => Plan::Free,
        }
    }
}
