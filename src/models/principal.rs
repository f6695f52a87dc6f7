use super::UserRole;
use serde_derive::{Deserialize, Serialize};

/// Authenticated caller, built from verified bearer token claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub subject: String,
    pub email: String,
    pub role: UserRole,
    pub organization_id: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    #[error("Access to another organization is forbidden")]
    Forbidden,
    #[error("organization_id is required")]
    Missing,
}

impl Principal {
    /// Organization a request acts on. Admins may target any organization;
    /// everyone else is pinned to their own.
    pub fn organization_scope(&self, requested: Option<i32>) -> Result<i32, ScopeError> {
        match (self.role.is_admin(), self.organization_id, requested) {
            (true, _, Some(id)) => Ok(id),
            (_, Some(own), None) => Ok(own),
            (_, Some(own), Some(id)) if own == id => Ok(own),
            (_, _, Some(_)) => Err(ScopeError::Forbidden),
            (_, None, None) => Err(ScopeError::Missing),
        }
    }
}
