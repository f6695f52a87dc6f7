use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "List users.", skip(pg_pool))]
#[get("")]
pub async fn list(
    query: web::Query<forms::UserListQuery>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (limit, offset) = forms::page(query.limit, query.offset);
    db::user::fetch_list(pg_pool.get_ref(), query.organization_id, limit, offset)
        .await
        .map(|users| JsonResponse::build().set_list(users).ok("OK"))
        .map_err(|err| JsonResponse::<models::User>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Get user.", skip(pg_pool))]
#[get("/{id}")]
pub async fn item(path: web::Path<(i32,)>, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let id = path.0;
    db::user::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::User>::build().internal_server_error(err))
        .and_then(|user| match user {
            Some(user) => Ok(JsonResponse::build().set_item(user).ok("OK")),
            None => Err(JsonResponse::<models::User>::build().not_found("User not found")),
        })
}
