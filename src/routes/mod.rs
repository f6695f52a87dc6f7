pub(crate) mod analytics;
pub(crate) mod asset;
pub(crate) mod feature_matrix;
pub mod health_checks;
pub(crate) mod issue;
pub(crate) mod organization;
pub(crate) mod plan_tracking;
pub(crate) mod road;
pub(crate) mod setting;
pub(crate) mod transaction;
pub(crate) mod user;

pub use health_checks::*;

use crate::db::WriteError;
use crate::helpers::JsonResponse;
use crate::models::{Principal, ScopeError};
use actix_web::web;
use std::sync::Arc;

pub(crate) fn write_error_response<T: serde::Serialize>(err: WriteError) -> actix_web::Error {
    match err {
        WriteError::Conflict(msg) => JsonResponse::<T>::build().conflict(msg),
        WriteError::Internal(msg) => JsonResponse::<T>::build().internal_server_error(msg),
    }
}

/// For endpoints that also serve anonymous callers.
pub(crate) fn require_principal(
    principal: Option<web::ReqData<Arc<Principal>>>,
) -> Result<Arc<Principal>, actix_web::Error> {
    principal
        .map(web::ReqData::into_inner)
        .ok_or_else(|| JsonResponse::<()>::build().unauthorized("Authentication required"))
}

pub(crate) fn organization_scope(
    principal: &Principal,
    requested: Option<i32>,
) -> Result<i32, actix_web::Error> {
    principal
        .organization_scope(requested)
        .map_err(|err| match err {
            ScopeError::Forbidden => JsonResponse::<()>::build().forbidden(err.to_string()),
            ScopeError::Missing => JsonResponse::<()>::build().bad_request(err.to_string()),
        })
}
