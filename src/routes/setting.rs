use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "List settings.", skip(pg_pool))]
#[get("")]
pub async fn list(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::setting::fetch_all(pg_pool.get_ref())
        .await
        .map(|settings| JsonResponse::build().set_list(settings).ok("OK"))
        .map_err(|err| JsonResponse::<models::SystemSetting>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Get setting.", skip(pg_pool))]
#[get("/{key}")]
pub async fn item(path: web::Path<(String,)>, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let key = path.into_inner().0;
    db::setting::fetch(pg_pool.get_ref(), &key)
        .await
        .map_err(|err| JsonResponse::<models::SystemSetting>::build().internal_server_error(err))
        .and_then(|setting| match setting {
            Some(setting) => Ok(JsonResponse::build().set_item(setting).ok("OK")),
            None => Err(JsonResponse::<models::SystemSetting>::build()
                .not_found("Setting not found")),
        })
}

#[tracing::instrument(name = "Save setting.", skip(pg_pool))]
#[put("/{key}")]
pub async fn upsert(
    path: web::Path<(String,)>,
    form: web::Json<forms::SettingForm>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let key = path.into_inner().0;
    if !forms::is_valid_setting_key(&key) {
        return Err(JsonResponse::<models::SystemSetting>::build()
            .bad_request("Setting keys are dotted lowercase identifiers"));
    }
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::SystemSetting>::build().form_error(errors.to_string()));
    }

    db::setting::upsert(
        pg_pool.get_ref(),
        &key,
        &form.value,
        form.description.as_deref(),
    )
    .await
    .map(|setting| JsonResponse::build().set_item(setting).ok("Saved"))
    .map_err(|err| JsonResponse::<models::SystemSetting>::build().internal_server_error(err))
}
