//! Transcript parsing endpoint
//!
//! `POST /parse-pdf` takes a multipart upload with the PDF in the `pdf`
//! field (`file` is accepted too) and answers with the course rows found in
//! its text.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::transcript::{parse_text_with_summary, CourseRecord, ParseSummary};
use crate::upload::TempUpload;

/// Multipart field names that carry the transcript
const FILE_FIELDS: [&str; 2] = ["pdf", "file"];

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub success: bool,
    pub data: Vec<CourseRecord>,
}

/// Create the parse router
pub fn router() -> Router<AppState> {
    Router::new().route("/parse-pdf", post(parse_pdf))
}

/// POST /parse-pdf
async fn parse_pdf(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ParseResponse>> {
    // A request that is not multipart at all has no file either
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!("Rejected non-multipart request: {}", e);
        AppError::MissingFile
    })?;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        if !FILE_FIELDS.contains(&name.as_str()) {
            tracing::debug!("Ignoring multipart field '{}'", name);
            continue;
        }

        let filename = field.file_name().unwrap_or("unknown.pdf").to_string();
        let data = field.bytes().await?;
        if data.is_empty() {
            tracing::debug!("Field '{}' carried no file data", name);
            continue;
        }

        tracing::debug!("Received '{}' ({} bytes)", filename, data.len());

        let upload = state.uploads().persist(&data).await?;
        let outcome = extract_records(&state, &upload).await;
        upload.remove().await?;
        let (records, summary) = outcome?;

        tracing::info!(
            file_name = %filename,
            total_lines = summary.total_lines,
            matched = summary.matched,
            skipped = summary.skipped(),
            "Parsed transcript"
        );

        return Ok(Json(ParseResponse {
            success: true,
            data: records,
        }));
    }

    Err(AppError::MissingFile)
}

/// Read the stored upload back, extract its text and parse every line
async fn extract_records(
    state: &AppState,
    upload: &TempUpload,
) -> Result<(Vec<CourseRecord>, ParseSummary)> {
    let bytes = upload.read().await?;
    let text = state.extractor().extract_text(bytes).await?;
    Ok(parse_text_with_summary(&text))
}
