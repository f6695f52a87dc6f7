use crate::models;
use crate::models::IssueStatus;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::IssueReport>, String> {
    let query_span = tracing::info_span!("Fetching the issue report by ID");
    sqlx::query_as::<_, models::IssueReport>(
        r#"
        SELECT id, organization_id, title, description, category, status, latitude, longitude,
               reporter_email, created_at, updated_at
        FROM issue_reports
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch issue report, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_by_organization(
    pool: &PgPool,
    organization_id: i32,
    status: Option<IssueStatus>,
) -> Result<Vec<models::IssueReport>, String> {
    let query_span = tracing::info_span!("Fetching issue reports of organization");
    sqlx::query_as::<_, models::IssueReport>(
        r#"
        SELECT id, organization_id, title, description, category, status, latitude, longitude,
               reporter_email, created_at, updated_at
        FROM issue_reports
        WHERE organization_id = $1
          AND ($2::issue_status IS NULL OR status = $2)
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(organization_id)
    .bind(status)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch issue reports, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn insert(
    pool: &PgPool,
    issue: models::IssueReport,
) -> Result<models::IssueReport, String> {
    let query_span = tracing::info_span!("Saving new issue report into the database");
    sqlx::query_as::<_, models::IssueReport>(
        r#"
        INSERT INTO issue_reports (organization_id, title, description, category, status, latitude,
                                   longitude, reporter_email, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW() at time zone 'utc', NOW() at time zone 'utc')
        RETURNING id, organization_id, title, description, category, status, latitude, longitude,
                  reporter_email, created_at, updated_at
        "#,
    )
    .bind(issue.organization_id)
    .bind(&issue.title)
    .bind(&issue.description)
    .bind(&issue.category)
    .bind(issue.status)
    .bind(issue.latitude)
    .bind(issue.longitude)
    .bind(&issue.reporter_email)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(|issue| {
        tracing::info!("New issue report {} has been saved to the database", issue.id);
        issue
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

pub async fn update_status(
    pool: &PgPool,
    id: i32,
    status: IssueStatus,
) -> Result<models::IssueReport, String> {
    let query_span = tracing::info_span!("Updating issue report status");
    sqlx::query_as::<_, models::IssueReport>(
        r#"
        UPDATE issue_reports
        SET status=$2, updated_at=NOW() at time zone 'utc'
        WHERE id = $1
        RETURNING id, organization_id, title, description, category, status, latitude, longitude,
                  reporter_email, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Could not update issue report".to_string()
    })
}
