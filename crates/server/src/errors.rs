use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::error;

use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// JSON error body: `{"error": title, "detail": ...}` plus any extra fields.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub detail: Option<String>,
    pub extra: Option<Value>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, detail: Option<String>) -> Self {
        Self { status, error, detail, extra: None }
    }

    pub fn with_extra(mut self, extra: Value) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(what.into()))
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(detail.into()))
    }

    pub fn forgery(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Anti-Forgery Check Failed", Some(detail.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "error": self.error, "detail": self.detail });
        if let (Some(Value::Object(extra)), Value::Object(map)) = (self.extra, &mut body) {
            map.extend(extra);
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(rejected) => {
                let detail = format!("invalid fields: {}", rejected.fields().join(", "));
                JsonApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error", Some(detail))
                    .with_extra(json!({ "input": rejected.input, "fields": rejected.errors }))
            }
            ServiceError::NotFound(id) => JsonApiError::not_found(format!("joke {id} not found")),
            ServiceError::Conflict(id) => {
                error!(id, "unresolved concurrency conflict");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Concurrency Conflict", Some(format!("joke {id} was modified concurrently")))
            }
            ServiceError::Db(msg) => {
                error!(err = %msg, "storage failure");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage Error", Some(msg))
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let detail = Some(e.to_string());
        match e {
            AuthError::Validation(_) => JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", detail),
            AuthError::Conflict => JsonApiError::new(StatusCode::CONFLICT, "Conflict", detail),
            AuthError::Unauthorized | AuthError::TokenError(_) => JsonApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized", detail),
            AuthError::HashError(_) | AuthError::Repository(_) => {
                error!(code = e.code(), err = ?detail, "auth failure");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", detail)
            }
        }
    }
}
