use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::write_error_response;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Add transaction.", skip(pg_pool))]
#[post("")]
pub async fn add(
    form: web::Json<forms::TransactionForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Transaction>::build().form_error(errors.to_string()));
    }

    form.check_initial_status()
        .map_err(|err| JsonResponse::<models::Transaction>::build().bad_request(err))?;

    let transaction: models::Transaction = (&*form).into();

    db::transaction::insert(pg_pool.get_ref(), transaction)
        .await
        .map(|transaction| {
            JsonResponse::build()
                .set_id(transaction.id)
                .set_item(transaction)
                .ok("Saved")
        })
        .map_err(write_error_response::<models::Transaction>)
}
