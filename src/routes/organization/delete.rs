use crate::db;
use crate::feature_matrix::FeatureMatrixService;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::write_error_response;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Delete organization.", skip(pg_pool, feature_matrix))]
#[delete("/{id}")]
pub async fn delete(
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
    feature_matrix: web::Data<FeatureMatrixService>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    let deleted = db::organization::delete(pg_pool.get_ref(), id)
        .await
        .map_err(write_error_response::<models::Organization>)?;

    feature_matrix.invalidate_organization(id).await;

    match deleted {
        true => Ok(JsonResponse::<models::Organization>::build().ok("Deleted")),
        false => Err(JsonResponse::<models::Organization>::build()
            .not_found("Organization not found")),
    }
}
