use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::write_error_response;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Add user.", skip(pg_pool))]
#[post("")]
pub async fn add(
    form: web::Json<forms::UserForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::User>::build().form_error(errors.to_string()));
    }

    let user: models::User = (&*form).into();

    db::user::insert(pg_pool.get_ref(), user)
        .await
        .map(|user| JsonResponse::build().set_id(user.id).set_item(user).ok("Saved"))
        .map_err(write_error_response::<models::User>)
}
