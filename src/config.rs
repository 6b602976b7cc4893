//! Configuration for the service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Ingestion configuration
    #[serde(default)]
    pub ingest: IngestConfig,
    /// Report generation configuration
    #[serde(default)]
    pub report: ReportConfig,
    /// Download configuration
    #[serde(default)]
    pub download: DownloadConfig,
}

impl ServiceConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        toml::from_str(&raw).map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 50MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            max_upload_size: 50 * 1024 * 1024, // 50MB
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = dirs::data_local_dir()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
            .join("sheetstore")
            .join("files.db");

        Self { db_path }
    }
}

/// Ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// What to do with the first sheet's header row
    #[serde(default)]
    pub header_mode: HeaderMode,
    /// Timeout for ingesting a single workbook in seconds (default: 60)
    #[serde(default = "default_ingest_timeout")]
    pub timeout_secs: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            header_mode: HeaderMode::default(),
            timeout_secs: default_ingest_timeout(),
        }
    }
}

fn default_ingest_timeout() -> u64 {
    60
}

/// How the header row of an uploaded sheet is persisted.
///
/// The historical pipeline dropped the header at ingestion time, which means
/// the report builder (which reads the stored blob header-first) promotes the
/// first data row to the section's title row. `Strip` keeps that behavior
/// byte-for-byte; `Preserve` stores the header and fixes the round trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMode {
    /// Discard the header row; only data rows are persisted (legacy behavior)
    #[default]
    Strip,
    /// Persist the header row as the first encoded row
    Preserve,
}

/// Report generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default policy for selected names with no stored file
    #[serde(default)]
    pub missing_files: MissingFilePolicy,
    /// Timeout for generating one report in seconds (default: 120)
    #[serde(default = "default_report_timeout")]
    pub timeout_secs: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            missing_files: MissingFilePolicy::default(),
            timeout_secs: default_report_timeout(),
        }
    }
}

fn default_report_timeout() -> u64 {
    120
}

/// Policy applied when a selected file name has no stored row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFilePolicy {
    /// Silently skip the name; the report gets no section for it (legacy behavior)
    #[default]
    Skip,
    /// Abort the whole report with a not-found error
    Strict,
}

/// Download configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Content type advertised for downloaded blobs
    #[serde(default)]
    pub label: DownloadLabel,
}

/// Content type label used for file downloads.
///
/// Stored blobs are delimited text, but the original service advertised them
/// with the xlsx media type and existing callers may depend on that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadLabel {
    /// Historical xlsx label (legacy behavior)
    #[default]
    Spreadsheet,
    /// Advertise the actual encoding, text/csv
    DelimitedText,
}

impl DownloadLabel {
    /// The Content-Type header value for this label
    pub fn content_type(&self) -> &'static str {
        match self {
            DownloadLabel::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            DownloadLabel::DelimitedText => "text/csv",
        }
    }
}
