use crate::db;
use crate::feature_matrix::FeatureMatrixService;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::models::FeatureKey;
use crate::routes::{organization_scope, require_principal};
use crate::services::{gating, IssueSamples};
use actix_web::{get, post, put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "List issue reports.", skip(pg_pool, feature_matrix))]
#[get("")]
pub async fn list(
    query: web::Query<forms::IssueListQuery>,
    principal: Option<web::ReqData<Arc<models::Principal>>>,
    pg_pool: web::Data<PgPool>,
    feature_matrix: web::Data<FeatureMatrixService>,
) -> Result<impl Responder> {
    let principal = require_principal(principal)?;
    let organization_id = organization_scope(&principal, query.organization_id)?;
    let access = gating::access(
        &feature_matrix,
        pg_pool.get_ref(),
        organization_id,
        FeatureKey::IssueReports,
    )
    .await?;

    let status = query.status;
    let mut gated = gating::gate(access, &IssueSamples, || async {
        db::issue::fetch_by_organization(pg_pool.get_ref(), organization_id, status)
            .await
            .map_err(|err| JsonResponse::<models::IssueReport>::build().internal_server_error(err))
    })
    .await?;

    if let Some(status) = status {
        gated.items.retain(|issue| issue.status == status);
    }

    let meta = gated.meta();
    Ok(JsonResponse::build()
        .set_list(gated.items)
        .set_meta(meta)
        .ok("OK"))
}

/// Citizen submission. Anonymous callers must name the organization.
#[tracing::instrument(name = "Submit issue report.", skip(pg_pool, feature_matrix))]
#[post("")]
pub async fn add(
    form: web::Json<forms::IssueForm>,
    principal: Option<web::ReqData<Arc<models::Principal>>>,
    pg_pool: web::Data<PgPool>,
    feature_matrix: web::Data<FeatureMatrixService>,
) -> Result<impl Responder> {
    let organization_id = match principal {
        Some(principal) => organization_scope(&principal, form.organization_id)?,
        None => form.organization_id.ok_or_else(|| {
            JsonResponse::<models::IssueReport>::build().bad_request("organization_id is required")
        })?,
    };

    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::IssueReport>::build().form_error(errors.to_string()));
    }

    gating::access(
        &feature_matrix,
        pg_pool.get_ref(),
        organization_id,
        FeatureKey::IssueReports,
    )
    .await?
    .ensure_writable()?;

    let issue = form.into_inner().into_model(organization_id);
    db::issue::insert(pg_pool.get_ref(), issue)
        .await
        .map(|issue| JsonResponse::build().set_id(issue.id).set_item(issue).ok("Saved"))
        .map_err(|err| JsonResponse::<models::IssueReport>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Update issue report status.", skip(pg_pool, feature_matrix))]
#[put("/{id}/status")]
pub async fn update_status(
    path: web::Path<(i32,)>,
    form: web::Json<forms::IssueStatusForm>,
    principal: Option<web::ReqData<Arc<models::Principal>>>,
    pg_pool: web::Data<PgPool>,
    feature_matrix: web::Data<FeatureMatrixService>,
) -> Result<impl Responder> {
    let principal = require_principal(principal)?;
    if !principal.role.can_edit() {
        return Err(JsonResponse::<models::IssueReport>::build().forbidden("Read-only role"));
    }

    let id = path.0;
    let issue = db::issue::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::IssueReport>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::IssueReport>::build().not_found("Issue not found"))?;

    let organization_id = organization_scope(&principal, Some(issue.organization_id))?;
    gating::access(
        &feature_matrix,
        pg_pool.get_ref(),
        organization_id,
        FeatureKey::IssueReports,
    )
    .await?
    .ensure_writable()?;

    db::issue::update_status(pg_pool.get_ref(), id, form.status)
        .await
        .map(|issue| JsonResponse::build().set_item(issue).ok("success"))
        .map_err(|err| JsonResponse::<models::IssueReport>::build().internal_server_error(err))
}
