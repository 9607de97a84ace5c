use actix_web::{
    error::{JsonPayloadError, PathError},
    http::{header, StatusCode},
    HttpRequest, HttpResponse, ResponseError,
};
use serde_json::json;

use crate::errors::AppError;

/// Rejection of a request body before it reaches a handler.
#[derive(Debug)]
pub struct JsonError {
    message: String,
    status: StatusCode
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status).json(json!({ "detail": self.message }))
    }
}

impl JsonError {
    pub fn from_payload_error(err: JsonPayloadError, req: &HttpRequest) -> Self {
        match err {
            JsonPayloadError::ContentType => {
                let content_type = req.headers()
                    .get(header::CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("");
                JsonError {
                    message: format!("Unsupported media type \"{}\" in request.", content_type),
                    status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
                }
            }
            JsonPayloadError::Deserialize(e) => JsonError::from(e),
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => JsonError {
                message: "Request body is too large.".to_string(),
                status: StatusCode::PAYLOAD_TOO_LARGE,
            },
            other => JsonError {
                message: format!("JSON parse error - {}", other),
                status: StatusCode::BAD_REQUEST,
            },
        }
    }
}

impl From<serde_json::Error> for JsonError {
    fn from(err: serde_json::Error) -> Self {
        JsonError {
            message: format!("JSON parse error - {}", err),
            status: StatusCode::BAD_REQUEST,
        }
    }
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, path = %req.path(), "Rejected request body");
    JsonError::from_payload_error(err, req).into()
}

/// An id that does not fit the path parameter names no existing record.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::NotFound(err.to_string()).into()
}

pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound(format!("No route for {} {}", req.method(), req.path())))
}
