use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{put, web, Responder, Result};
use sqlx::PgPool;

/// Status changes follow pending -> completed/failed and completed -> refunded.
#[tracing::instrument(name = "Update transaction status.", skip(pg_pool))]
#[put("/{id}/status")]
pub async fn update_status(
    path: web::Path<(i32,)>,
    form: web::Json<forms::TransactionStatusForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let id = path.0;
    let transaction = db::transaction::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Transaction>::build().internal_server_error(err))?
        .ok_or_else(|| {
            JsonResponse::<models::Transaction>::build().not_found("Transaction not found")
        })?;

    if !transaction.status.can_transition_to(form.status) {
        return Err(JsonResponse::<models::Transaction>::build().conflict(format!(
            "Cannot move transaction from {:?} to {:?}",
            transaction.status, form.status
        )));
    }

    db::transaction::update_status(pg_pool.get_ref(), id, transaction.status, form.status)
        .await
        .map_err(|err| JsonResponse::<models::Transaction>::build().internal_server_error(err))?
        .map(|transaction| JsonResponse::build().set_item(transaction).ok("success"))
        .ok_or_else(|| {
            JsonResponse::<models::Transaction>::build()
                .conflict("Transaction status was changed by another request")
        })
}
