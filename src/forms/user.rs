use crate::models;
use crate::models::user::{UserRole, UserStatus};
use chrono::Utc;
use serde_derive::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserForm {
    #[validate(minimum = 1)]
    pub organization_id: i32,
    #[validate(max_length = 255)]
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$")]
    pub email: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 200)]
    pub full_name: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub status: UserStatus,
}

impl From<&UserForm> for models::User {
    fn from(form: &UserForm) -> Self {
        let mut user = models::User::default();
        user.organization_id = form.organization_id;
        user.email = form.email.trim().to_lowercase();
        user.full_name = form.full_name.trim().to_string();
        user.role = form.role;
        user.status = form.status;
        user.created_at = Utc::now();
        user.updated_at = Utc::now();
        user
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    pub organization_id: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
