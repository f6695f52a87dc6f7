use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::revenue;
use actix_web::{get, web, Responder, Result};
use serde_json::json;
use sqlx::PgPool;

#[tracing::instrument(name = "Revenue analytics.", skip(pg_pool))]
#[get("")]
pub async fn revenue_analytics(
    query: web::Query<forms::RevenueQuery>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from >= to {
            return Err(JsonResponse::<revenue::RevenueAnalytics>::build()
                .bad_request("`from` must be before `to`"));
        }
    }

    let transactions = db::transaction::fetch_between(pg_pool.get_ref(), query.from, query.to)
        .await
        .map_err(|err| {
            JsonResponse::<revenue::RevenueAnalytics>::build().internal_server_error(err)
        })?;

    Ok(JsonResponse::build()
        .set_item(revenue::summarize(&transactions))
        .set_meta(json!({ "from": query.from, "to": query.to }))
        .ok("OK"))
}
