use crate::db;
use crate::feature_matrix::FeatureMatrixService;
use crate::helpers::JsonResponse;
use crate::models;
use crate::models::Plan;
use crate::routes::organization_scope;
use actix_web::{get, web, Responder, Result};
use serde_json::json;
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::sync::Arc;

async fn fetch_organization(
    pg_pool: &PgPool,
    id: i32,
) -> Result<models::Organization, actix_web::Error> {
    db::organization::fetch(pg_pool, id)
        .await
        .map_err(|err| JsonResponse::<()>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<()>::build().not_found("Organization not found"))
}

/// Current plan of an organization and everything it unlocks.
#[tracing::instrument(name = "Organization plan.", skip(pg_pool, feature_matrix))]
#[get("/organizations/{id}")]
pub async fn organization(
    path: web::Path<(i32,)>,
    principal: web::ReqData<Arc<models::Principal>>,
    pg_pool: web::Data<PgPool>,
    feature_matrix: web::Data<FeatureMatrixService>,
) -> Result<impl Responder> {
    let id = organization_scope(&principal, Some(path.0))?;
    let epoch = feature_matrix.epoch().await;
    let organization = fetch_organization(pg_pool.get_ref(), id).await?;

    let effective_plan = organization.effective_plan();
    feature_matrix
        .remember_organization_plan(id, effective_plan, epoch)
        .await;
    let matrix = feature_matrix.matrix(effective_plan).await;

    Ok(JsonResponse::<serde_json::Value>::build()
        .set_item(json!({
            "organization_id": organization.id,
            "name": organization.name,
            "status": organization.status,
            "plan": organization.plan,
            "effective_plan": effective_plan,
            "matrix": matrix,
        }))
        .ok("OK"))
}

#[tracing::instrument(name = "Organization plan history.", skip(pg_pool))]
#[get("/organizations/{id}/history")]
pub async fn history(
    path: web::Path<(i32,)>,
    principal: web::ReqData<Arc<models::Principal>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let id = organization_scope(&principal, Some(path.0))?;
    fetch_organization(pg_pool.get_ref(), id).await?;

    db::plan_change::fetch_by_organization(pg_pool.get_ref(), id)
        .await
        .map(|changes| JsonResponse::build().set_list(changes).ok("OK"))
        .map_err(|err| JsonResponse::<models::PlanChange>::build().internal_server_error(err))
}

/// Organization count per plan, every plan listed.
#[tracing::instrument(name = "Plan summary.", skip(pg_pool))]
#[get("/summary")]
pub async fn summary(
    principal: web::ReqData<Arc<models::Principal>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if !principal.role.is_admin() {
        return Err(JsonResponse::<()>::build().forbidden("Admin role required"));
    }

    let counts = db::organization::count_by_plan(pg_pool.get_ref())
        .await
        .map_err(|err| JsonResponse::<()>::build().internal_server_error(err))?;

    let summary: BTreeMap<Plan, i64> = Plan::ALL
        .iter()
        .map(|plan| (*plan, counts.get(plan).copied().unwrap_or(0)))
        .collect();
    let total: i64 = summary.values().sum();

    Ok(JsonResponse::build()
        .set_item(summary)
        .set_meta(json!({ "total": total }))
        .ok("OK"))
}
