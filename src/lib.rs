//! sheetstore: spreadsheet upload, storage and combined report generation
//!
//! This crate implements a small backend service that accepts spreadsheet
//! uploads, stores their tabular data as delimited text blobs in SQLite,
//! serves them back for download, and can combine any selection of stored
//! files into a single generated Word document with one table per file.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod report;
pub mod server;
pub mod storage;
pub mod types;

pub use config::ServiceConfig;
pub use error::{Error, Result};
pub use storage::FileRepository;
pub use types::{
    stored_file::StoredFileEntry,
    table::SheetTable,
};
