//! Core types for the service

pub mod response;
pub mod stored_file;
pub mod table;

pub use response::{
    Credentials, FileListResponse, MessageResponse, ReportRequest, UploadError, UploadResponse,
    UploadedFile,
};
pub use stored_file::{validate_file_name, StoredFileEntry};
pub use table::SheetTable;
