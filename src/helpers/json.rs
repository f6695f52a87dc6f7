use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, Error, HttpResponse};
use serde_derive::Serialize;

/// Envelope shared by every endpoint, success and error alike.
#[derive(Serialize)]
pub struct JsonResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

pub struct JsonResponseBuilder<T> {
    message: String,
    id: Option<i32>,
    item: Option<T>,
    list: Option<Vec<T>>,
    meta: Option<serde_json::Value>,
}

impl<T> Default for JsonResponseBuilder<T> {
    fn default() -> Self {
        Self {
            message: String::new(),
            id: None,
            item: None,
            list: None,
            meta: None,
        }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    pub fn set_msg<I: Into<String>>(mut self, message: I) -> Self {
        self.message = message.into();
        self
    }

    pub fn set_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    pub fn set_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = Some(meta);
        self
    }

    fn into_response(self) -> JsonResponse<T> {
        JsonResponse {
            message: self.message,
            id: self.id,
            item: self.item,
            list: self.list,
            meta: self.meta,
        }
    }

    pub fn ok<I: Into<String>>(self, message: I) -> web::Json<JsonResponse<T>> {
        web::Json(self.set_msg(message).into_response())
    }

    fn error<I: Into<String>>(self, status: StatusCode, message: I) -> Error {
        let response = self.set_msg(message).into_response();
        let message = response.message.clone();
        tracing::debug!(status = status.as_u16(), message = %message, "request failed");

        InternalError::from_response(message, HttpResponse::build(status).json(response)).into()
    }

    pub fn bad_request<I: Into<String>>(self, message: I) -> Error {
        self.error(StatusCode::BAD_REQUEST, message)
    }

    /// Validation failure; `errors` is the serde_valid error report.
    pub fn form_error(self, errors: String) -> Error {
        let meta = serde_json::from_str::<serde_json::Value>(&errors)
            .unwrap_or(serde_json::Value::String(errors));
        self.set_meta(meta)
            .error(StatusCode::BAD_REQUEST, "Validation error")
    }

    pub fn unauthorized<I: Into<String>>(self, message: I) -> Error {
        self.error(StatusCode::UNAUTHORIZED, message)
    }

    pub fn payment_required<I: Into<String>>(self, message: I) -> Error {
        self.error(StatusCode::PAYMENT_REQUIRED, message)
    }

    pub fn forbidden<I: Into<String>>(self, message: I) -> Error {
        self.error(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found<I: Into<String>>(self, message: I) -> Error {
        self.error(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict<I: Into<String>>(self, message: I) -> Error {
        self.error(StatusCode::CONFLICT, message)
    }

    pub fn service_unavailable<I: Into<String>>(self, message: I) -> Error {
        self.error(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn internal_server_error<I: Into<String>>(self, message: I) -> Error {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "Internal error".to_string()
        } else {
            message
        };
        self.error(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl<T> JsonResponse<T>
where
    T: serde::Serialize,
{
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;
    use actix_web::ResponseError;

    #[test]
    fn ok_envelope_skips_empty_fields() {
        let response = JsonResponse::build().set_item(42).ok("OK");
        let body = serde_json::to_value(&response.0).unwrap();

        assert_eq!(body["message"], "OK");
        assert_eq!(body["item"], 42);
        assert!(body.get("list").is_none());
        assert!(body.get("id").is_none());
    }

    #[test]
    fn error_keeps_status_and_envelope() {
        let error = JsonResponse::<String>::build().not_found("Organization not found");
        let response = error.as_response_error().error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().try_into_bytes().unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Organization not found");
    }

    #[test]
    fn empty_internal_error_message_gets_default() {
        let error = JsonResponse::<String>::build().internal_server_error("");
        let response = error.as_response_error().error_response();
        let bytes = response.into_body().try_into_bytes().unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Internal error");
    }
}
