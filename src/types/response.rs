//! API response types

use serde::{Deserialize, Serialize};

use super::stored_file::StoredFileEntry;

/// Response for the upload endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// True when at least one file was stored
    pub success: bool,
    /// Files stored by this request
    pub files: Vec<UploadedFile>,
    /// Per-file failures; a failed file does not abort the others
    pub errors: Vec<UploadError>,
    /// Total processing time in milliseconds
    pub processing_time_ms: u64,
}

/// One successfully stored file
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Storage row ID
    pub id: i64,
    /// File name as stored
    pub name: String,
    /// Data rows persisted (header excluded in strip mode)
    pub rows: usize,
    /// Columns in the sheet
    pub columns: usize,
}

/// Error for a single file during upload
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadError {
    /// Filename that failed
    pub filename: String,
    /// Error message
    pub error: String,
}

/// Response for the file listing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct FileListResponse {
    /// Stored names in storage order; duplicates appear once per row.
    /// Ordering is unspecified and must not be relied upon.
    pub files: Vec<String>,
    /// Per-row detail for the same entries
    pub entries: Vec<StoredFileEntry>,
    /// Total number of stored rows
    pub total: usize,
}

/// Request body for report generation
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Stored file names to combine, in order; duplicates allowed
    pub selected_files: Vec<String>,
    /// Override the configured missing-file policy for this request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_files: Option<crate::config::MissingFilePolicy>,
}

/// Credentials for register/login
#[derive(Debug, Serialize, Deserialize)]
pub struct Credentials {
    /// User email
    pub email: String,
    /// Password, compared verbatim
    pub password: String,
}

/// Generic message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}
