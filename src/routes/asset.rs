use crate::db;
use crate::feature_matrix::FeatureMatrixService;
use crate::forms;
use crate::helpers::{JsonResponse, TtlCache};
use crate::models;
use crate::models::FeatureKey;
use crate::routes::organization_scope;
use crate::services::{gating, AssetSamples};
use actix_web::{get, post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

/// Live asset lists per organization.
pub type AssetListCache = TtlCache<i32, Vec<models::Asset>>;

#[tracing::instrument(name = "List assets.", skip(pg_pool, feature_matrix, cache))]
#[get("")]
pub async fn list(
    query: web::Query<forms::ScopeQuery>,
    principal: web::ReqData<Arc<models::Principal>>,
    pg_pool: web::Data<PgPool>,
    feature_matrix: web::Data<FeatureMatrixService>,
    cache: web::Data<AssetListCache>,
) -> Result<impl Responder> {
    let organization_id = organization_scope(&principal, query.organization_id)?;
    let access = gating::access(
        &feature_matrix,
        pg_pool.get_ref(),
        organization_id,
        FeatureKey::AssetManager,
    )
    .await?;

    let gated = gating::gate(access, &AssetSamples, || async {
        cache
            .get_or_try_insert_with(organization_id, || {
                db::asset::fetch_by_organization(pg_pool.get_ref(), organization_id)
            })
            .await
            .map_err(|err| JsonResponse::<models::Asset>::build().internal_server_error(err))
    })
    .await?;

    let meta = gated.meta();
    Ok(JsonResponse::build()
        .set_list(gated.items)
        .set_meta(meta)
        .ok("OK"))
}

#[tracing::instrument(name = "Add asset.", skip(pg_pool, feature_matrix, cache))]
#[post("")]
pub async fn add(
    query: web::Query<forms::ScopeQuery>,
    form: web::Json<forms::AssetForm>,
    principal: web::ReqData<Arc<models::Principal>>,
    pg_pool: web::Data<PgPool>,
    feature_matrix: web::Data<FeatureMatrixService>,
    cache: web::Data<AssetListCache>,
) -> Result<impl Responder> {
    if !principal.role.can_edit() {
        return Err(JsonResponse::<models::Asset>::build().forbidden("Read-only role"));
    }
    let organization_id = organization_scope(&principal, query.organization_id)?;

    gating::access(
        &feature_matrix,
        pg_pool.get_ref(),
        organization_id,
        FeatureKey::AssetManager,
    )
    .await?
    .ensure_writable()?;

    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Asset>::build().form_error(errors.to_string()));
    }

    let asset = form.into_inner().into_model(organization_id);
    let asset = db::asset::insert(pg_pool.get_ref(), asset)
        .await
        .map_err(|err| JsonResponse::<models::Asset>::build().internal_server_error(err))?;

    cache.invalidate(&organization_id).await;

    Ok(JsonResponse::build()
        .set_id(asset.id)
        .set_item(asset)
        .ok("Saved"))
}
