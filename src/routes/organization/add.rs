use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::write_error_response;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Add organization.", skip(pg_pool))]
#[post("")]
pub async fn add(
    form: web::Json<forms::OrganizationForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Organization>::build().form_error(errors.to_string()));
    }

    let organization: models::Organization = (&*form).into();

    db::organization::insert(pg_pool.get_ref(), organization)
        .await
        .map(|organization| {
            JsonResponse::build()
                .set_id(organization.id)
                .set_item(organization)
                .ok("Saved")
        })
        .map_err(write_error_response::<models::Organization>)
}
