//! Stored file metadata and name validation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Metadata for one stored file row.
///
/// Names are not unique; two uploads under the same name produce two entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFileEntry {
    /// Row ID assigned by storage
    pub id: i64,
    /// File name as uploaded
    pub name: String,
    /// Size of the stored blob in bytes
    pub size: u64,
    /// When the file was ingested
    pub uploaded_at: DateTime<Utc>,
}

/// Validate a caller-supplied file name before it reaches storage or a
/// Content-Disposition header.
///
/// Rejects empty names, path separators, parent-directory references and
/// control characters. Accepted names are used verbatim as storage keys and
/// download filenames.
pub fn validate_file_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidName("empty name".to_string()));
    }
    if name.len() > 255 {
        return Err(Error::InvalidName(format!(
            "name too long ({} bytes, max 255)",
            name.len()
        )));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidName(format!(
            "'{}' contains a path separator",
            name
        )));
    }
    if name == "." || name == ".." {
        return Err(Error::InvalidName(format!(
            "'{}' is a directory reference",
            name
        )));
    }
    if name.chars().any(|c| c.is_control()) {
        return Err(Error::InvalidName(
            "name contains control characters".to_string(),
        ));
    }
    if name.contains('"') {
        // Would break out of the quoted Content-Disposition filename
        return Err(Error::InvalidName(format!("'{}' contains a quote", name)));
    }
    Ok(())
}
