use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::write_error_response;
use actix_web::{put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Update user.", skip(pg_pool))]
#[put("/{id}")]
pub async fn update(
    path: web::Path<(i32,)>,
    form: web::Json<forms::UserForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let id = path.0;
    let existing = db::user::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::User>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::User>::build().not_found("User not found"))?;

    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::User>::build().form_error(errors.to_string()));
    }

    let mut user: models::User = (&*form).into();
    user.id = existing.id;
    user.created_at = existing.created_at;

    db::user::update(pg_pool.get_ref(), user)
        .await
        .map(|user| JsonResponse::build().set_item(user).ok("success"))
        .map_err(write_error_response::<models::User>)
}
