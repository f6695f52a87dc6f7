use crate::db;
use crate::feature_matrix::FeatureMatrixService;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::write_error_response;
use actix_web::{put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Update organization.", skip(pg_pool, feature_matrix))]
#[put("/{id}")]
pub async fn update(
    path: web::Path<(i32,)>,
    form: web::Json<forms::OrganizationForm>,
    pg_pool: web::Data<PgPool>,
    feature_matrix: web::Data<FeatureMatrixService>,
) -> Result<impl Responder> {
    let id = path.0;
    let mut organization = db::organization::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Organization>::build().internal_server_error(err))?
        .ok_or_else(|| {
            JsonResponse::<models::Organization>::build().not_found("Organization not found")
        })?;

    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Organization>::build().form_error(errors.to_string()));
    }

    if form.plan.is_some_and(|plan| plan != organization.plan) {
        return Err(JsonResponse::<models::Organization>::build()
            .bad_request("Use PUT /{id}/plan to change the plan"));
    }

    form.update(&mut organization);
    tracing::debug!("Updating organization {:?}", organization);

    let organization = db::organization::update(pg_pool.get_ref(), organization)
        .await
        .map_err(write_error_response::<models::Organization>)?;

    // status changes alter the effective plan
    feature_matrix.invalidate_organization(id).await;

    Ok(JsonResponse::build().set_item(organization).ok("success"))
}
