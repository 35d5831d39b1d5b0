//! Application state for the web layer.

use std::sync::Arc;

use crate::backend::BackendClient;
use crate::cache::CachedOffers;
use crate::directory::AirportDirectory;
use crate::planner::ScanConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Fare API client with offer caching
    pub source: Arc<CachedOffers<BackendClient>>,

    /// Airport names for search
    pub directory: AirportDirectory,

    /// Defaults for scan parameters the request leaves out
    pub config: Arc<ScanConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        source: CachedOffers<BackendClient>,
        directory: AirportDirectory,
        config: ScanConfig,
    ) -> Self {
        Self {
            source: Arc::new(source),
            directory,
            config: Arc::new(config),
        }
    }
}
