use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::SystemSetting>, String> {
    let query_span = tracing::info_span!("Fetching system settings");
    sqlx::query_as::<_, models::SystemSetting>(
        "SELECT key, value, description, updated_at FROM system_settings ORDER BY key",
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch settings, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch(pool: &PgPool, key: &str) -> Result<Option<models::SystemSetting>, String> {
    let query_span = tracing::info_span!("Fetching system setting");
    sqlx::query_as::<_, models::SystemSetting>(
        "SELECT key, value, description, updated_at FROM system_settings WHERE key = $1",
    )
    .bind(key)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch setting, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn upsert(
    pool: &PgPool,
    key: &str,
    value: &serde_json::Value,
    description: Option<&str>,
) -> Result<models::SystemSetting, String> {
    let query_span = tracing::info_span!("Saving system setting");
    sqlx::query_as::<_, models::SystemSetting>(
        r#"
        INSERT INTO system_settings (key, value, description, updated_at)
        VALUES ($1, $2, $3, NOW() at time zone 'utc')
        ON CONFLICT (key) DO UPDATE
        SET value = EXCLUDED.value,
            description = COALESCE(EXCLUDED.description, system_settings.description),
            updated_at = EXCLUDED.updated_at
        RETURNING key, value, description, updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(description)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(|setting| {
        tracing::info!("Setting {} has been saved", setting.key);
        setting
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Could not save setting".to_string()
    })
}
