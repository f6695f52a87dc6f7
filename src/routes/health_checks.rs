use crate::helpers::JsonResponse;
use actix_web::{get, web, Responder, Result};
use serde_json::json;
use sqlx::PgPool;

#[get("")]
pub async fn health_check() -> impl Responder {
    JsonResponse::<()>::build().ok("OK")
}

/// Readiness: the service is only useful with a reachable database.
#[tracing::instrument(name = "Readiness check.", skip(pg_pool))]
#[get("/ready")]
pub async fn readiness(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pg_pool.get_ref())
        .await
        .map(|_| {
            JsonResponse::<()>::build()
                .set_meta(json!({ "database": "up" }))
                .ok("OK")
        })
        .map_err(|err| {
            tracing::error!("Database is not reachable: {:?}", err);
            JsonResponse::<()>::build()
                .set_meta(json!({ "database": "down" }))
                .service_unavailable("Database is not reachable")
        })
}
