//! Error types for the Transcript server

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::pdf::ExtractionError;

/// Message returned when the request carries no PDF
pub const MISSING_FILE_MESSAGE: &str = "PDF file is required";

/// Message returned for every processing failure
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse PDF";

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No PDF file in request")]
    MissingFile,

    #[error("Text extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFile => StatusCode::BAD_REQUEST,
            AppError::Extraction(_) | AppError::Io(_) | AppError::Multipart(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::MissingFile => {
                tracing::warn!("No file field found in multipart upload");
                MISSING_FILE_MESSAGE
            }
            AppError::Extraction(e) => {
                tracing::error!("PDF extraction error: {}", e);
                PARSE_FAILURE_MESSAGE
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {}", e);
                PARSE_FAILURE_MESSAGE
            }
            AppError::Multipart(e) => {
                tracing::error!("Failed to read multipart body: {}", e);
                PARSE_FAILURE_MESSAGE
            }
        };

        (self.status_code(), Json(ErrorResponse { error: message })).into_response()
    }
}
