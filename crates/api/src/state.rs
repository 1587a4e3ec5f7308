use std::sync::Arc;

use battmon_db::{Dataset, DbError};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// The dataset is loaded once before the server binds and never changes
/// afterwards, so handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Classified readings snapshot.
    pub dataset: Arc<Dataset>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(dataset: Dataset, config: ServerConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            config: Arc::new(config),
        }
    }

    /// Load the dataset named in `config`.
    pub fn load(config: ServerConfig) -> Result<Self, DbError> {
        let dataset = Dataset::load(&config.dataset_path)?;
        Ok(Self::new(dataset, config))
    }
}
