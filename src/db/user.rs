use super::{write_error, WriteError};
use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Fetching the user by ID");
    sqlx::query_as::<_, models::User>(
        r#"
        SELECT id, organization_id, email, full_name, role, status, created_at, updated_at
        FROM users
        WHERE id = $1
        LIMIT 1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch user, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_list(
    pool: &PgPool,
    organization_id: Option<i32>,
    limit: i64,
    offset: i64,
) -> Result<Vec<models::User>, String> {
    let query_span = tracing::info_span!("Fetching users");
    sqlx::query_as::<_, models::User>(
        r#"
        SELECT id, organization_id, email, full_name, role, status, created_at, updated_at
        FROM users
        WHERE ($1::integer IS NULL OR organization_id = $1)
        ORDER BY id
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(organization_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch users, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn insert(pool: &PgPool, user: models::User) -> Result<models::User, WriteError> {
    let query_span = tracing::info_span!("Saving new user into the database");
    sqlx::query_as::<_, models::User>(
        r#"
        INSERT INTO users (organization_id, email, full_name, role, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW() at time zone 'utc', NOW() at time zone 'utc')
        RETURNING id, organization_id, email, full_name, role, status, created_at, updated_at
        "#,
    )
    .bind(user.organization_id)
    .bind(user.email.to_lowercase())
    .bind(&user.full_name)
    .bind(user.role)
    .bind(user.status)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(|user| {
        tracing::info!("New user {} has been saved to the database", user.id);
        user
    })
    .map_err(|err| write_error(err, "Email is already in use or organization does not exist"))
}

pub async fn update(pool: &PgPool, user: models::User) -> Result<models::User, WriteError> {
    let query_span = tracing::info_span!("Updating user");
    sqlx::query_as::<_, models::User>(
        r#"
        UPDATE users
        SET
            organization_id=$2,
            email=$3,
            full_name=$4,
            role=$5,
            status=$6,
            updated_at=NOW() at time zone 'utc'
        WHERE id = $1
        RETURNING id, organization_id, email, full_name, role, status, created_at, updated_at
        "#,
    )
    .bind(user.id)
    .bind(user.organization_id)
    .bind(user.email.to_lowercase())
    .bind(&user.full_name)
    .bind(user.role)
    .bind(user.status)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| write_error(err, "Email is already in use or organization does not exist"))
}

#[tracing::instrument(name = "Delete user.", skip(pool))]
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, String> {
    sqlx::query::<sqlx::Postgres>("DELETE FROM users WHERE id = $1;")
        .bind(id)
        .execute(pool)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete user: {:?}", err);
            "Failed to delete user".to_string()
        })
}

/// Users pointing at organizations that no longer exist.
pub async fn fetch_orphaned(pool: &PgPool) -> Result<Vec<(i32, i32)>, String> {
    sqlx::query_as::<_, (i32, i32)>(
        r#"
        SELECT u.id, u.organization_id
        FROM users u
        LEFT JOIN organizations o ON o.id = u.organization_id
        WHERE o.id IS NULL
        ORDER BY u.id
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to check users: {:?}", err);
        "Could not fetch data".to_string()
    })
}
