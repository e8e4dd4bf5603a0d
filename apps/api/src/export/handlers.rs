//! Axum route handler for letter export.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::export::{export_filename, writer_for, ExportFormat};

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub subtype: String,
    pub format: ExportFormat,
    /// Final letter text, including any hand edits.
    pub text: String,
}

/// POST /api/export
///
/// Returns the letter as a downloadable attachment. Formats without a local writer
/// answer 501 so the front-end hands them to its own PDF/DOCX writer.
pub async fn handle_export(AppJson(request): AppJson<ExportRequest>) -> Result<Response, AppError> {
    if request.subtype.trim().is_empty() {
        return Err(AppError::Validation("subtype cannot be empty".to_string()));
    }

    let writer = writer_for(request.format).ok_or_else(|| {
        AppError::NotImplemented(format!(
            "{} export is produced by the client-side document writer",
            request.format.extension()
        ))
    })?;

    let filename = export_filename(&request.subtype, writer.format());
    info!("Exporting {filename} ({} chars)", request.text.len());

    Ok((
        [
            (header::CONTENT_TYPE, writer.format().content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        writer.write(&request.text),
    )
        .into_response())
}
