use crate::db;
use crate::feature_matrix::FeatureMatrixService;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{put, web, Responder, Result};
use serde_json::json;
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

/// Moves an organization to another plan. Every change is recorded in the
/// plan history.
#[tracing::instrument(name = "Change organization plan.", skip(pg_pool, feature_matrix))]
#[put("/{id}/plan")]
pub async fn change_plan(
    path: web::Path<(i32,)>,
    form: web::Json<forms::ChangePlanForm>,
    principal: web::ReqData<Arc<models::Principal>>,
    pg_pool: web::Data<PgPool>,
    feature_matrix: web::Data<FeatureMatrixService>,
) -> Result<impl Responder> {
    let id = path.0;

    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Organization>::build().form_error(errors.to_string()));
    }
    let plan = form
        .plan()
        .map_err(|err| JsonResponse::<models::Organization>::build().bad_request(err))?;

    let (organization, change) =
        db::organization::change_plan(pg_pool.get_ref(), id, plan, &principal.email)
            .await
            .map_err(|err| {
                JsonResponse::<models::Organization>::build().internal_server_error(err)
            })?
            .ok_or_else(|| {
                JsonResponse::<models::Organization>::build().not_found("Organization not found")
            })?;

    feature_matrix
        .set_organization_plan(id, organization.effective_plan())
        .await;

    Ok(JsonResponse::build()
        .set_item(organization)
        .set_meta(json!({
            "previous_plan": change.previous_plan,
            "new_plan": change.new_plan,
            "changed_by": change.changed_by,
            "changed_at": change.changed_at,
        }))
        .ok("Plan changed"))
}
