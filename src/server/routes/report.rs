//! Combined report endpoint

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use std::time::Duration;
use tokio::time::timeout;

use crate::error::{Error, Result};
use crate::report::{ReportBuilder, REPORT_CONTENT_TYPE, REPORT_FILENAME};
use crate::server::state::AppState;
use crate::types::ReportRequest;

/// POST /api/reports - Combine selected stored files into one Word document
///
/// Files are rendered in request order, one table section per fetched file.
/// The missing-file policy defaults to the configured one and can be
/// overridden per request. The document is returned in the response body;
/// no server-side file is written.
pub async fn generate_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<impl IntoResponse> {
    let policy = request
        .missing_files
        .unwrap_or(state.config().report.missing_files);
    let builder = ReportBuilder::new(policy);

    let report_timeout = Duration::from_secs(state.config().report.timeout_secs);
    let selected = request.selected_files;

    // Fetch, decode and pack are all synchronous work, so the build runs on
    // the blocking pool; the deadline watches the join handle.
    let task = tokio::task::spawn_blocking({
        let repository = state.repository().clone();
        let names = selected.clone();
        move || builder.build(&repository, &names)
    });

    let bytes = match timeout(report_timeout, task).await {
        Ok(joined) => {
            joined.map_err(|e| Error::internal(format!("Report task failed: {}", e)))??
        }
        Err(_) => {
            tracing::error!(
                "Timeout generating report over {} files after {}s",
                selected.len(),
                report_timeout.as_secs()
            );
            return Err(Error::timeout("report", report_timeout.as_secs()));
        }
    };

    tracing::info!(
        "Generated report over {} selected files ({} bytes)",
        selected.len(),
        bytes.len()
    );

    let headers = [
        (header::CONTENT_TYPE, REPORT_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", REPORT_FILENAME),
        ),
    ];

    Ok((headers, bytes))
}
