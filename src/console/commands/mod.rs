mod bootstrap_admin;
mod callable;
mod check_constraints;
mod issue_token;
mod matrix;
mod migrate;

pub use bootstrap_admin::BootstrapAdminCommand;
pub use callable::*;
pub use check_constraints::CheckConstraintsCommand;
pub use issue_token::IssueTokenCommand;
pub use matrix::MatrixCommand;
pub use migrate::MigrateCommand;

use crate::configuration::Settings;
use sqlx::PgPool;

pub(crate) async fn connect(settings: &Settings) -> Result<PgPool, Box<dyn std::error::Error>> {
    PgPool::connect(&settings.database.connection_string())
        .await
        .map_err(|err| format!("Failed to connect to database: {}", err).into())
}
