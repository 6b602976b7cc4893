//! Application state shared across request handlers

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::storage::FileRepository;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: ServiceConfig,
    /// File and user repository (single connection behind a mutex)
    repository: FileRepository,
}

impl AppState {
    /// Create new application state, opening the database
    pub fn new(config: ServiceConfig) -> Result<Self> {
        tracing::info!(
            "Opening repository at {}",
            config.storage.db_path.display()
        );
        let repository = FileRepository::new(&config.storage.db_path)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, repository }),
        })
    }

    /// State backed by an in-memory database (for testing)
    pub fn in_memory(config: ServiceConfig) -> Result<Self> {
        let repository = FileRepository::in_memory()?;
        Ok(Self {
            inner: Arc::new(AppStateInner { config, repository }),
        })
    }

    /// Service configuration
    pub fn config(&self) -> &ServiceConfig {
        &self.inner.config
    }

    /// File repository
    pub fn repository(&self) -> &FileRepository {
        &self.inner.repository
    }
}
