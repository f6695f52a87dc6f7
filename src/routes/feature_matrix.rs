use crate::feature_matrix::FeatureMatrixService;
use crate::helpers::JsonResponse;
use crate::models::{FeatureKey, Plan};
use actix_web::{get, web, Responder, Result};
use serde_derive::Serialize;
use serde_json::json;

#[derive(Debug, Serialize)]
struct FeatureDescriptor {
    key: FeatureKey,
    group: crate::models::FeatureGroup,
}

/// The feature registry, so clients know every key they may be asked about.
#[tracing::instrument(name = "List features.", skip(feature_matrix))]
#[get("/features")]
pub async fn features(feature_matrix: web::Data<FeatureMatrixService>) -> impl Responder {
    let list: Vec<FeatureDescriptor> = FeatureKey::ALL
        .iter()
        .map(|key| FeatureDescriptor {
            key: *key,
            group: key.group(),
        })
        .collect();

    JsonResponse::build()
        .set_list(list)
        .set_meta(json!({
            "version": feature_matrix.resolver().version(),
            "plans": Plan::ALL,
        }))
        .ok("OK")
}

/// Unknown plans get the free matrix.
#[tracing::instrument(name = "Feature matrix for plan.", skip(feature_matrix))]
#[get("/plan/{plan}")]
pub async fn plan_matrix(
    path: web::Path<(String,)>,
    feature_matrix: web::Data<FeatureMatrixService>,
) -> Result<impl Responder> {
    let requested = path.into_inner().0;
    let plan = Plan::parse_or_free(&requested);
    let matrix = feature_matrix.matrix(plan).await;

    Ok(JsonResponse::build()
        .set_item(matrix)
        .set_meta(json!({
            "requested": requested,
            "recognized": Plan::parse(&requested).is_some(),
        }))
        .ok("OK"))
}

/// Unknown features are `not_shown`.
#[tracing::instrument(name = "Feature state for plan.", skip(feature_matrix))]
#[get("/plan/{plan}/{feature}")]
pub async fn plan_feature(
    path: web::Path<(String, String)>,
    feature_matrix: web::Data<FeatureMatrixService>,
) -> Result<impl Responder> {
    let (requested_plan, requested_feature) = path.into_inner();
    let plan = Plan::parse_or_free(&requested_plan);
    let state = feature_matrix
        .resolver()
        .resolve_str(&requested_plan, &requested_feature);

    Ok(JsonResponse::<serde_json::Value>::build()
        .set_item(json!({
            "plan": plan,
            "feature": requested_feature,
            "state": state,
            "visible": state.is_visible(),
            "interactive": state.is_interactive(),
        }))
        .ok("OK"))
}
