pub mod asset;
pub mod issue;
pub mod organization;
pub mod plan_change;
pub mod setting;
pub mod transaction;
pub mod user;

/// Failure of an insert/update/delete. Constraint violations are reported
/// separately so handlers can answer 409 instead of 500.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

pub(crate) fn write_error(err: sqlx::Error, conflict: &str) -> WriteError {
    match &err {
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation() || db_err.is_foreign_key_violation() =>
        {
            tracing::info!("Constraint violation: {:?}", db_err);
            WriteError::Conflict(conflict.to_string())
        }
        _ => {
            tracing::error!("Failed to execute query: {:?}", err);
            WriteError::Internal("Internal Server Error".to_string())
        }
    }
}
