//! Infrastructure layer for Carfinder: catalog clients and configuration loading.

pub mod config_service;
pub mod http_catalog_client;
pub mod memory_catalog;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::http_catalog_client::HttpCatalogClient;
pub use crate::memory_catalog::InMemoryCatalog;
pub use crate::paths::CarfinderPaths;
