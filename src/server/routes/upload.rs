//! Spreadsheet upload endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::time::{Duration, Instant};
use tokio::time::timeout;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::ingestion::IngestPipeline;
use crate::server::state::AppState;
use crate::storage::FileRepository;
use crate::types::{validate_file_name, UploadError, UploadResponse, UploadedFile};

/// POST /api/upload - Upload and store spreadsheet files
///
/// Each multipart field is one workbook. Files are processed independently;
/// a file that fails to parse is reported in `errors` without aborting the
/// rest of the batch.
pub async fn upload_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let start = Instant::now();
    let mut files = Vec::new();
    let mut errors = Vec::new();

    let pipeline = IngestPipeline::new(state.config().ingest.header_mode);
    let ingest_timeout = Duration::from_secs(state.config().ingest.timeout_secs);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::internal(format!("Failed to read multipart field: {}", e)))?
    {
        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("file_{}.bin", Uuid::new_v4()));

        let data = match field.bytes().await {
            Ok(d) => d,
            Err(e) => {
                errors.push(UploadError {
                    filename,
                    error: format!("Failed to read file: {}", e),
                });
                continue;
            }
        };

        tracing::info!("Processing upload: {} ({} bytes)", filename, data.len());

        if let Err(e) = validate_file_name(&filename) {
            errors.push(UploadError {
                filename,
                error: e.to_string(),
            });
            continue;
        }

        // Parsing and encoding are CPU-bound with no await points, so they
        // run on the blocking pool; the deadline watches the join handle.
        let task = tokio::task::spawn_blocking({
            let repository = state.repository().clone();
            let filename = filename.clone();
            let data = data.clone();
            move || ingest_one(&repository, &pipeline, &filename, &data)
        });

        match timeout(ingest_timeout, task).await {
            Ok(Ok(Ok(stored))) => {
                tracing::info!("Ingested '{}' as row {}", filename, stored.id);
                files.push(stored);
            }
            Ok(Ok(Err(e @ Error::Storage(_)))) => {
                // A storage failure is not per-file noise; abort the request
                return Err(e);
            }
            Ok(Ok(Err(e))) => {
                tracing::warn!("Failed to ingest '{}': {}", filename, e);
                errors.push(UploadError {
                    filename,
                    error: e.to_string(),
                });
            }
            Ok(Err(e)) => {
                return Err(Error::internal(format!("Ingest task failed: {}", e)));
            }
            Err(_) => {
                tracing::error!(
                    "Timeout ingesting '{}' after {}s ({} bytes)",
                    filename,
                    ingest_timeout.as_secs(),
                    data.len()
                );
                return Err(Error::timeout("ingest", ingest_timeout.as_secs()));
            }
        }
    }

    let processing_time_ms = start.elapsed().as_millis() as u64;

    Ok(Json(UploadResponse {
        success: !files.is_empty(),
        files,
        errors,
        processing_time_ms,
    }))
}

/// Parse, encode and store one workbook
fn ingest_one(
    repository: &FileRepository,
    pipeline: &IngestPipeline,
    filename: &str,
    data: &[u8],
) -> Result<UploadedFile> {
    let (table, encoded) = pipeline.prepare(filename, data)?;
    let id = repository.put(filename, &encoded)?;

    Ok(UploadedFile {
        id,
        name: filename.to_string(),
        rows: table.rows.len(),
        columns: table.width(),
    })
}
