use crate::models;
use crate::models::IssueStatus;
use chrono::Utc;
use serde_derive::{Deserialize, Serialize};
use serde_valid::Validate;

/// Citizen submitted report. Anonymous submitters must name the
/// organization; signed-in staff default to their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct IssueForm {
    pub organization_id: Option<i32>,
    #[validate(min_length = 3)]
    #[validate(max_length = 200)]
    pub title: String,
    #[serde(default)]
    #[validate(max_length = 5000)]
    pub description: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 100)]
    pub category: String,
    #[validate(minimum = -90.0)]
    #[validate(maximum = 90.0)]
    pub latitude: f64,
    #[validate(minimum = -180.0)]
    #[validate(maximum = 180.0)]
    pub longitude: f64,
    #[validate(max_length = 255)]
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$")]
    pub reporter_email: Option<String>,
}

impl IssueForm {
    pub fn into_model(self, organization_id: i32) -> models::IssueReport {
        models::IssueReport {
            id: 0,
            organization_id,
            title: self.title.trim().to_string(),
            description: self.description,
            category: self.category.trim().to_lowercase(),
            status: IssueStatus::Open,
            latitude: self.latitude,
            longitude: self.longitude,
            reporter_email: self.reporter_email,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueStatusForm {
    pub status: IssueStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct IssueListQuery {
    pub organization_id: Option<i32>,
    pub status: Option<IssueStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_out_of_range_fail() {
        let form: IssueForm = serde_json::from_str(
            r#"{"title": "Pothole", "category": "road", "latitude": 120.0, "longitude": 13.4}"#,
        )
        .unwrap();
        assert!(form.validate().is_err());
    }

    #[test]
    fn new_reports_start_open() {
        let form: IssueForm = serde_json::from_str(
            r#"{"title": "Broken streetlight", "category": "Lighting", "latitude": 52.5, "longitude": 13.4}"#,
        )
        .unwrap();
        assert!(form.validate().is_ok());
        let issue = form.into_model(7);
        assert_eq!(issue.status, IssueStatus::Open);
        assert_eq!(issue.organization_id, 7);
        assert_eq!(issue.category, "lighting");
    }
}
