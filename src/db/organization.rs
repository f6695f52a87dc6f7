use super::{write_error, WriteError};
use crate::models;
use crate::models::{OrganizationStatus, Plan};
use sqlx::PgPool;
use std::collections::BTreeMap;
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::Organization>, String> {
    let query_span = tracing::info_span!("Fetching the organization by ID");
    sqlx::query_as::<_, models::Organization>(
        r#"
        SELECT id, name, slug, plan, status, contact_email, created_at, updated_at
        FROM organizations
        WHERE id = $1
        LIMIT 1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch organization, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_list(
    pool: &PgPool,
    plan: Option<Plan>,
    status: Option<OrganizationStatus>,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<models::Organization>, String> {
    let query_span = tracing::info_span!("Fetching organizations");
    sqlx::query_as::<_, models::Organization>(
        r#"
        SELECT id, name, slug, plan, status, contact_email, created_at, updated_at
        FROM organizations
        WHERE ($1::text[] IS NULL
               OR lower(replace(replace(trim(plan), '-', '_'), ' ', '_')) = ANY($1)
               OR ($6 AND NOT (lower(replace(replace(trim(plan), '-', '_'), ' ', '_')) = ANY($7))))
          AND ($2::organization_status IS NULL OR status = $2)
          AND ($3::text IS NULL OR name ILIKE '%' || $3 || '%')
        ORDER BY id
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(plan.map(|plan| plan.stored_names()))
    .bind(status)
    .bind(search)
    .bind(limit)
    .bind(offset)
    // legacy rows with unrecognised names read back as free
    .bind(plan == Some(Plan::Free))
    .bind(Plan::known_names())
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch organizations, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn insert(
    pool: &PgPool,
    mut organization: models::Organization,
) -> Result<models::Organization, WriteError> {
    let query_span = tracing::info_span!("Saving new organization into the database");
    sqlx::query_as::<_, (i32, chrono::DateTime<chrono::Utc>)>(
        r#"
        INSERT INTO organizations (name, slug, plan, status, contact_email, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW() at time zone 'utc', NOW() at time zone 'utc')
        RETURNING id, created_at
        "#,
    )
    .bind(&organization.name)
    .bind(&organization.slug)
    .bind(organization.plan)
    .bind(organization.status)
    .bind(&organization.contact_email)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |(id, created_at)| {
        tracing::info!("New organization {} has been saved to the database", id);
        organization.id = id;
        organization.created_at = created_at;
        organization.updated_at = created_at;
        organization
    })
    .map_err(|err| write_error(err, "Organization slug is already taken"))
}

/// Updates name, slug, status and contact. The plan only changes through
/// [`change_plan`] so that every change is tracked.
pub async fn update(
    pool: &PgPool,
    organization: models::Organization,
) -> Result<models::Organization, WriteError> {
    let query_span = tracing::info_span!("Updating organization");
    sqlx::query_as::<_, models::Organization>(
        r#"
        UPDATE organizations
        SET
            name=$2,
            slug=$3,
            status=$4,
            contact_email=$5,
            updated_at=NOW() at time zone 'utc'
        WHERE id = $1
        RETURNING id, name, slug, plan, status, contact_email, created_at, updated_at
        "#,
    )
    .bind(organization.id)
    .bind(&organization.name)
    .bind(&organization.slug)
    .bind(organization.status)
    .bind(&organization.contact_email)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(|organization| {
        tracing::info!("Organization {} has been updated", organization.id);
        organization
    })
    .map_err(|err| write_error(err, "Organization slug is already taken"))
}

/// Switches the plan and records the change in one transaction.
/// Returns `None` when the organization does not exist.
#[tracing::instrument(name = "Change organization plan.", skip(pool))]
pub async fn change_plan(
    pool: &PgPool,
    id: i32,
    plan: Plan,
    changed_by: &str,
) -> Result<Option<(models::Organization, models::PlanChange)>, String> {
    let internal = |err: sqlx::Error| {
        tracing::error!("Failed to change plan: {:?}", err);
        "Could not change plan".to_string()
    };

    let mut tx = pool.begin().await.map_err(internal)?;

    let previous = sqlx::query_scalar::<_, Plan>(
        "SELECT plan FROM organizations WHERE id = $1 FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(internal)?;

    let previous = match previous {
        Some(previous) => previous,
        None => return Ok(None),
    };

    let organization = sqlx::query_as::<_, models::Organization>(
        r#"
        UPDATE organizations
        SET plan=$2, updated_at=NOW() at time zone 'utc'
        WHERE id = $1
        RETURNING id, name, slug, plan, status, contact_email, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(plan)
    .fetch_one(&mut *tx)
    .await
    .map_err(internal)?;

    let change = sqlx::query_as::<_, models::PlanChange>(
        r#"
        INSERT INTO plan_changes (organization_id, previous_plan, new_plan, changed_by, changed_at)
        VALUES ($1, $2, $3, $4, NOW() at time zone 'utc')
        RETURNING id, organization_id, previous_plan, new_plan, changed_by, changed_at
        "#,
    )
    .bind(id)
    .bind(previous)
    .bind(plan)
    .bind(changed_by)
    .fetch_one(&mut *tx)
    .await
    .map_err(internal)?;

    tx.commit().await.map_err(internal)?;
    tracing::info!("Organization {} moved from {} to {}", id, previous, plan);

    Ok(Some((organization, change)))
}

#[tracing::instrument(name = "Delete organization.", skip(pool))]
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, WriteError> {
    sqlx::query::<sqlx::Postgres>("DELETE FROM organizations WHERE id = $1;")
        .bind(id)
        .execute(pool)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| write_error(err, "Organization still has billing history"))
}

/// Organization count per plan. Unknown stored plans are counted as free.
pub async fn count_by_plan(pool: &PgPool) -> Result<BTreeMap<Plan, i64>, String> {
    let query_span = tracing::info_span!("Counting organizations per plan");
    let rows = sqlx::query_as::<_, (Plan, i64)>(
        "SELECT plan, COUNT(*)::bigint FROM organizations GROUP BY plan",
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to count organizations: {:?}", err);
        "Could not fetch data".to_string()
    })?;

    let mut counts = BTreeMap::new();
    for (plan, count) in rows {
        *counts.entry(plan).or_insert(0) += count;
    }
    Ok(counts)
}

/// Raw plan column, for consistency checks.
pub async fn fetch_raw_plans(pool: &PgPool) -> Result<Vec<(i32, String)>, String> {
    sqlx::query_as::<_, (i32, String)>("SELECT id, plan FROM organizations ORDER BY id")
        .fetch_all(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch organization plans: {:?}", err);
            "Could not fetch data".to_string()
        })
}
