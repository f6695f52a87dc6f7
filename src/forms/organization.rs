use crate::models;
use crate::models::{OrganizationStatus, Plan};
use chrono::Utc;
use serde_derive::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct OrganizationForm {
    #[validate(min_length = 2)]
    #[validate(max_length = 120)]
    pub name: String,
    #[validate(min_length = 2)]
    #[validate(max_length = 64)]
    #[validate(pattern = r"^[a-z0-9]+(-[a-z0-9]+)*$")]
    pub slug: String,
    /// Only honoured on create; use the plan endpoint afterwards.
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub status: Option<OrganizationStatus>,
    #[validate(max_length = 255)]
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$")]
    pub contact_email: Option<String>,
}

impl From<&OrganizationForm> for models::Organization {
    fn from(form: &OrganizationForm) -> Self {
        let mut organization = models::Organization::default();
        organization.name = form.name.trim().to_string();
        organization.slug = form.slug.clone();
        organization.plan = form.plan.unwrap_or_default();
        organization.status = form.status.unwrap_or_default();
        organization.contact_email = form.contact_email.clone();
        organization.created_at = Utc::now();
        organization.updated_at = Utc::now();
        organization
    }
}

impl OrganizationForm {
    pub fn update(&self, organization: &mut models::Organization) {
        organization.name = self.name.trim().to_string();
        organization.slug = self.slug.clone();
        if let Some(status) = self.status {
            organization.status = status;
        }
        organization.contact_email = self.contact_email.clone();
    }
}

/// Body of `PUT /organizations/{id}/plan`. The plan is a free-form string so
/// legacy names are accepted; unknown names are rejected rather than
/// silently downgraded.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePlanForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 64)]
    pub plan: String,
}

impl ChangePlanForm {
    pub fn plan(&self) -> Result<Plan, String> {
        self.plan.parse::<Plan>().map_err(|err| err.to_string())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OrganizationListQuery {
    pub plan: Option<String>,
    pub status: Option<OrganizationStatus>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
