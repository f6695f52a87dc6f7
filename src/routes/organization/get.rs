use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::models::Plan;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "List organizations.", skip(pg_pool))]
#[get("")]
pub async fn list(
    query: web::Query<forms::OrganizationListQuery>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let plan = match query.plan.as_deref() {
        Some(raw) => Some(Plan::parse(raw).ok_or_else(|| {
            JsonResponse::<models::Organization>::build()
                .bad_request(format!("Unknown plan {:?}", raw))
        })?),
        None => None,
    };
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|search| !search.is_empty());
    let (limit, offset) = forms::page(query.limit, query.offset);

    db::organization::fetch_list(pg_pool.get_ref(), plan, query.status, search, limit, offset)
        .await
        .map(|organizations| JsonResponse::build().set_list(organizations).ok("OK"))
        .map_err(|err| JsonResponse::<models::Organization>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Get organization.", skip(pg_pool))]
#[get("/{id}")]
pub async fn item(
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let id = path.0;
    db::organization::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Organization>::build().internal_server_error(err))
        .and_then(|organization| match organization {
            Some(organization) => Ok(JsonResponse::build().set_item(organization).ok("OK")),
            None => Err(JsonResponse::<models::Organization>::build()
                .not_found("Organization not found")),
        })
}
