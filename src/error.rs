use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

/// Per-request failures in the verify pipeline. All variants surface to the
/// caller as a 400 with the detail string; only the message differs.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("invalid upload: {0}")]
    InvalidUpload(String),
    #[error("could not decode image: {0}")]
    DecodeFailure(String),
    #[error("inference failed: {0}")]
    InferenceFailure(String),
}

impl ResponseError for ProcessingError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::BadRequest().json(json!({
            "detail": format!("Error processing image: {}", self)
        }))
    }
}
