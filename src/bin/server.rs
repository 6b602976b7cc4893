//! Sheetstore server binary
//!
//! Run with: cargo run --bin sheetstore-server

use sheetstore::{config::ServiceConfig, server::Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheetstore=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration (SHEETSTORE_CONFIG points at a TOML file)
    let config = match std::env::var("SHEETSTORE_CONFIG") {
        Ok(path) => ServiceConfig::from_file(&path)?,
        Err(_) => ServiceConfig::default(),
    };

    tracing::info!("Configuration loaded");
    tracing::info!("  - Database: {}", config.storage.db_path.display());
    tracing::info!("  - Header mode: {:?}", config.ingest.header_mode);
    tracing::info!("  - Missing files: {:?}", config.report.missing_files);
    tracing::info!("  - Max upload: {} bytes", config.server.max_upload_size);

    let server = Server::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}/api", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/upload       - Upload spreadsheets");
    println!("  GET  /api/files        - List stored files");
    println!("  GET  /api/download/:n  - Download a stored file");
    println!("  POST /api/reports      - Generate a combined report");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
