use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Delete user.", skip(pg_pool))]
#[delete("/{id}")]
pub async fn delete(
    path: web::Path<(i32,)>,
    principal: web::ReqData<Arc<models::Principal>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    if principal.subject == id.to_string() {
        return Err(JsonResponse::<models::User>::build().bad_request("You cannot delete yourself"));
    }

    db::user::delete(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::User>::build().internal_server_error(err))
        .and_then(|deleted| match deleted {
            true => Ok(JsonResponse::<models::User>::build().ok("Deleted")),
            false => Err(JsonResponse::<models::User>::build().not_found("User not found")),
        })
}
