use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch_by_organization(
    pool: &PgPool,
    organization_id: i32,
) -> Result<Vec<models::PlanChange>, String> {
    let query_span = tracing::info_span!("Fetching plan history");
    sqlx::query_as::<_, models::PlanChange>(
        r#"
        SELECT id, organization_id, previous_plan, new_plan, changed_by, changed_at
        FROM plan_changes
        WHERE organization_id = $1
        ORDER BY changed_at DESC, id DESC
        "#,
    )
    .bind(organization_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch plan history, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}
