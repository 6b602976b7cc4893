//! File listing and download endpoints

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{validate_file_name, FileListResponse};

/// GET /api/files - List stored file names
///
/// Duplicated names appear once per stored row. The order entries come back
/// in is unspecified.
pub async fn list_files(State(state): State<AppState>) -> Result<Json<FileListResponse>> {
    let entries = state.repository().list_entries()?;
    let files: Vec<String> = entries.iter().map(|e| e.name.clone()).collect();
    let total = entries.len();

    Ok(Json(FileListResponse {
        files,
        entries,
        total,
    }))
}

/// GET /api/download/:name - Download a stored file
///
/// The body is the stored blob verbatim. The advertised content type comes
/// from configuration: by default the historical spreadsheet label, even
/// though the blob is delimited text. The suggested filename is the stored
/// name verbatim (names are validated before they ever reach storage).
pub async fn download_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse> {
    validate_file_name(&name)?;

    let content = state.repository().get(&name)?;
    tracing::info!("Serving '{}' ({} bytes)", name, content.len());

    let headers = [
        (
            header::CONTENT_TYPE,
            state.config().download.label.content_type().to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", name),
        ),
    ];

    Ok((headers, content))
}
