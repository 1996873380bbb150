use carfinder_core::catalog::CatalogService;
use carfinder_core::chat::AssistantService;
use carfinder_core::config::ClientConfig;
use carfinder_core::error::Result;
use carfinder_infrastructure::{HttpCatalogClient, InMemoryCatalog};
use carfinder_interaction::AssistantApiAgent;
use std::path::Path;
use std::sync::Arc;

use crate::search_session::SearchSession;

/// Factory for creating `SearchSession` instances from client configuration.
///
/// This factory wires the concrete catalog and assistant clients behind the
/// service traits the session depends on.
pub struct SessionFactory {
    config: ClientConfig,
}

impl SessionFactory {
    /// Creates a new SessionFactory.
    ///
    /// # Arguments
    ///
    /// * `config` - Resolved client configuration (service address, timeout)
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Creates a session backed by the HTTP catalog and assistant.
    pub fn create_session(&self) -> Result<SearchSession> {
        let catalog: Arc<dyn CatalogService> = Arc::new(HttpCatalogClient::new(self.config.clone())?);
        Ok(SearchSession::new(catalog, self.assistant()?))
    }

    /// Creates a session searching a local car list instead of the HTTP catalog.
    ///
    /// The assistant is still reached over HTTP.
    pub fn create_offline_session(&self, car_list: &Path) -> Result<SearchSession> {
        let catalog: Arc<dyn CatalogService> = Arc::new(InMemoryCatalog::from_json_file(car_list)?);
        Ok(SearchSession::new(catalog, self.assistant()?))
    }

    fn assistant(&self) -> Result<Arc<dyn AssistantService>> {
        Ok(Arc::new(AssistantApiAgent::new(self.config.clone())?))
    }
}
