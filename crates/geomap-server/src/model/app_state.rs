//! Shared application state handed to every HTTP worker

use std::sync::Arc;

use geomap_persistence::PersistenceService;

use crate::model::Configuration;
use crate::service::ObjectService;

/// Application state shared across handlers
pub struct AppState {
    pub configuration: Configuration,
    pub object_service: ObjectService,
}

impl AppState {
    pub fn new(configuration: Configuration, persistence: Arc<dyn PersistenceService>) -> Self {
        Self {
            configuration,
            object_service: ObjectService::new(persistence),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("configuration", &self.configuration)
            .field(
                "storage_mode",
                &self.object_service.storage_mode().to_string(),
            )
            .finish()
    }
}
