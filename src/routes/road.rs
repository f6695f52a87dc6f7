use crate::connectors::RoadDataConnector;
use crate::feature_matrix::FeatureMatrixService;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::models::FeatureKey;
use crate::routes::organization_scope;
use crate::services::{gating, RoadSamples};
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Road network.", skip(pg_pool, feature_matrix, connector))]
#[get("")]
pub async fn list(
    query: web::Query<forms::RoadQuery>,
    principal: web::ReqData<Arc<models::Principal>>,
    pg_pool: web::Data<PgPool>,
    feature_matrix: web::Data<FeatureMatrixService>,
    connector: web::Data<Arc<dyn RoadDataConnector>>,
) -> Result<impl Responder> {
    let bbox = query.bbox();
    bbox.validate()
        .map_err(|err| JsonResponse::<models::RoadSegment>::build().bad_request(err))?;

    let organization_id = organization_scope(&principal, query.organization_id)?;
    let access = gating::access(
        &feature_matrix,
        pg_pool.get_ref(),
        organization_id,
        FeatureKey::RoadNetwork,
    )
    .await?;

    let samples = RoadSamples { bbox: Some(bbox) };
    let gated = gating::gate(access, &samples, || async {
        connector.roads(bbox).await.map_err(actix_web::Error::from)
    })
    .await?;

    let mut meta = gated.meta();
    meta["bbox"] = serde_json::json!(bbox);
    Ok(JsonResponse::build()
        .set_list(gated.items)
        .set_meta(meta)
        .ok("OK"))
}
