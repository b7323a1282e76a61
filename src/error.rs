use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures of the image transform pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Crop {rect} exceeds image bounds {width}x{height}")]
    CropOutOfBounds {
        rect: String,
        width: u32,
        height: u32,
    },

    #[error("Unsupported color layout: {0}")]
    ColorConversion(String),

    #[error("Failed to process image: {0}")]
    Processing(String),
}

/// Failures of the object store boundary
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Object not found: {bucket}/{name}")]
    NotFound { bucket: String, name: String },

    #[error("Permission denied: {bucket}/{name}")]
    PermissionDenied { bucket: String, name: String },

    #[error("Invalid object name: {0}")]
    InvalidName(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of one triggered invocation
#[derive(Error, Debug)]
pub enum InvocationError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Worker task failed: {0}")]
    Worker(String),
}

/// Errors answered to the trigger endpoint
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Missing header: {0}")]
    MissingHeader(&'static str),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ServiceError::MissingHeader(_) => (StatusCode::BAD_REQUEST, "MISSING_HEADER"),
            ServiceError::InvalidEvent(_) => (StatusCode::BAD_REQUEST, "INVALID_EVENT"),
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}
