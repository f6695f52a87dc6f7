use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch_by_organization(
    pool: &PgPool,
    organization_id: i32,
) -> Result<Vec<models::Asset>, String> {
    let query_span = tracing::info_span!("Fetching assets of organization");
    sqlx::query_as::<_, models::Asset>(
        r#"
        SELECT id, organization_id, name, category, condition, latitude, longitude, created_at, updated_at
        FROM assets
        WHERE organization_id = $1
        ORDER BY id
        "#,
    )
    .bind(organization_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch assets, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn insert(pool: &PgPool, asset: models::Asset) -> Result<models::Asset, String> {
    let query_span = tracing::info_span!("Saving new asset into the database");
    sqlx::query_as::<_, models::Asset>(
        r#"
        INSERT INTO assets (organization_id, name, category, condition, latitude, longitude, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW() at time zone 'utc', NOW() at time zone 'utc')
        RETURNING id, organization_id, name, category, condition, latitude, longitude, created_at, updated_at
        "#,
    )
    .bind(asset.organization_id)
    .bind(&asset.name)
    .bind(&asset.category)
    .bind(asset.condition)
    .bind(asset.latitude)
    .bind(asset.longitude)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(|asset| {
        tracing::info!("New asset {} has been saved to the database", asset.id);
        asset
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}
