//! API routes for the server

pub mod auth;
pub mod files;
pub mod report;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Ingestion - with larger body limit for file uploads
        .route(
            "/upload",
            post(upload::upload_files).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Stored files
        .route("/files", get(files::list_files))
        .route("/download/:name", get(files::download_file))
        // Combined report generation
        .route("/reports", post(report::generate_report))
        // Credentials
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "sheetstore",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Spreadsheet upload, storage and combined report generation",
        "endpoints": {
            "POST /api/upload": "Upload spreadsheet files (multipart)",
            "GET /api/files": "List stored file names",
            "GET /api/download/:name": "Download a stored file",
            "POST /api/reports": "Combine stored files into one Word document",
            "POST /api/register": "Register a user",
            "POST /api/login": "Check credentials"
        }
    }))
}
