use super::{write_error, WriteError};
use crate::models;
use crate::models::TransactionStatus;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::Instrument;

const COLUMNS: &str = "id, organization_id, amount_cents, currency, kind, status, plan, description, created_at, updated_at";

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::Transaction>, String> {
    let query_span = tracing::info_span!("Fetching the transaction by ID");
    let sql = format!("SELECT {} FROM transactions WHERE id = $1 LIMIT 1", COLUMNS);
    sqlx::query_as::<_, models::Transaction>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch transaction, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_list(
    pool: &PgPool,
    organization_id: Option<i32>,
    status: Option<TransactionStatus>,
    limit: i64,
    offset: i64,
) -> Result<Vec<models::Transaction>, String> {
    let query_span = tracing::info_span!("Fetching transactions");
    let sql = format!(
        r#"
        SELECT {}
        FROM transactions
        WHERE ($1::integer IS NULL OR organization_id = $1)
          AND ($2::transaction_status IS NULL OR status = $2)
        ORDER BY created_at DESC, id DESC
        LIMIT $3 OFFSET $4
        "#,
        COLUMNS
    );
    sqlx::query_as::<_, models::Transaction>(&sql)
        .bind(organization_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch transactions, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

/// Transactions created inside `[from, to)`, for revenue analytics.
pub async fn fetch_between(
    pool: &PgPool,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<Vec<models::Transaction>, String> {
    let query_span = tracing::info_span!("Fetching transactions for analytics");
    let sql = format!(
        r#"
        SELECT {}
        FROM transactions
        WHERE ($1::timestamptz IS NULL OR created_at >= $1)
          AND ($2::timestamptz IS NULL OR created_at < $2)
        ORDER BY created_at
        "#,
        COLUMNS
    );
    sqlx::query_as::<_, models::Transaction>(&sql)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch transactions, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn insert(
    pool: &PgPool,
    transaction: models::Transaction,
) -> Result<models::Transaction, WriteError> {
    let query_span = tracing::info_span!("Saving new transaction into the database");
    let sql = format!(
        r#"
        INSERT INTO transactions (organization_id, amount_cents, currency, kind, status, plan, description, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, NOW() at time zone 'utc', NOW() at time zone 'utc')
        RETURNING {}
        "#,
        COLUMNS
    );
    sqlx::query_as::<_, models::Transaction>(&sql)
        .bind(transaction.organization_id)
        .bind(transaction.amount_cents)
        .bind(&transaction.currency)
        .bind(transaction.kind)
        .bind(transaction.status)
        .bind(transaction.plan)
        .bind(&transaction.description)
        .fetch_one(pool)
        .instrument(query_span)
        .await
        .map(|transaction| {
            tracing::info!("New transaction {} has been saved to the database", transaction.id);
            transaction
        })
        .map_err(|err| write_error(err, "Organization does not exist"))
}

/// Moves the transaction from `from` to `to` in one statement. `None` when
/// the row no longer has status `from`, either because it is missing or
/// because a concurrent request changed it first.
pub async fn update_status(
    pool: &PgPool,
    id: i32,
    from: TransactionStatus,
    to: TransactionStatus,
) -> Result<Option<models::Transaction>, String> {
    let query_span = tracing::info_span!("Updating transaction status");
    let sql = format!(
        r#"
        UPDATE transactions
        SET status=$2, updated_at=NOW() at time zone 'utc'
        WHERE id = $1 AND status = $3
        RETURNING {}
        "#,
        COLUMNS
    );
    sqlx::query_as::<_, models::Transaction>(&sql)
        .bind(id)
        .bind(to)
        .bind(from)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            "Could not update transaction".to_string()
        })
}

/// Transactions with a negative amount; refunds are stored as positive amounts.
pub async fn fetch_negative_amounts(pool: &PgPool) -> Result<Vec<i32>, String> {
    sqlx::query_scalar::<_, i32>("SELECT id FROM transactions WHERE amount_cents < 0 ORDER BY id")
        .fetch_all(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to check transactions: {:?}", err);
            "Could not fetch data".to_string()
        })
}
