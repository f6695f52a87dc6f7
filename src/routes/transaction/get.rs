use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "List transactions.", skip(pg_pool))]
#[get("")]
pub async fn list(
    query: web::Query<forms::TransactionListQuery>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (limit, offset) = forms::page(query.limit, query.offset);
    db::transaction::fetch_list(
        pg_pool.get_ref(),
        query.organization_id,
        query.status,
        limit,
        offset,
    )
    .await
    .map(|transactions| JsonResponse::build().set_list(transactions).ok("OK"))
    .map_err(|err| JsonResponse::<models::Transaction>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Get transaction.", skip(pg_pool))]
#[get("/{id}")]
pub async fn item(path: web::Path<(i32,)>, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let id = path.0;
    db::transaction::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Transaction>::build().internal_server_error(err))
        .and_then(|transaction| match transaction {
            Some(transaction) => Ok(JsonResponse::build().set_item(transaction).ok("OK")),
            None => Err(JsonResponse::<models::Transaction>::build()
                .not_found("Transaction not found")),
        })
}
